//! Derive macros for `FormEncode` and `FormDecode`.
//!
//! Only structs with named fields are supported. Field attributes:
//!
//! - `#[form(rename = "alias")]`: write the field under `alias` and accept `alias`
//!   on decode in addition to the derived spellings.
//! - `#[form(skip)]`: never read or write the field.
//!
//! Container attribute `#[form(crate = "path")]` points the generated code at a
//! re-exported `formwire`.
//!
//! Refer to the [`formwire`](https://docs.rs/formwire) crate for examples.
use {
    proc_macro::TokenStream,
    syn::{parse_macro_input, DeriveInput},
};

mod common;
mod form_decode;
mod form_encode;
mod names;

/// Implement `FormEncode` for a struct with named fields.
#[proc_macro_derive(FormEncode, attributes(form))]
pub fn derive_form_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match form_encode::generate(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}

/// Implement `FormRecord` and `FormDecode` for a struct with named fields.
#[proc_macro_derive(FormDecode, attributes(form))]
pub fn derive_form_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match form_decode::generate(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}
