use {
    crate::common::Record,
    darling::Result,
    proc_macro2::TokenStream,
    quote::quote,
    syn::DeriveInput,
};

pub(crate) fn generate(input: DeriveInput) -> Result<TokenStream> {
    let record = Record::parse(&input)?;
    let crate_name = &record.crate_name;
    let generics = record.bounded_generics(&quote!(#crate_name::FormField));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let ident = &record.ident;
    let count = record.fields.len();

    let write_impl = record.fields.iter().map(|field| {
        let member = &field.member;
        let key = field.wire_name();
        quote! {
            FormField::write_field(&self.#member, #key, &mut pairs);
        }
    });

    Ok(quote! {
        const _: () = {
            #[allow(unused_imports)]
            use #crate_name::{FormEncode, FormField, Pairs, Result};
            impl #impl_generics FormEncode for #ident #ty_generics #where_clause {
                fn encode_form(&self) -> Result<::std::vec::Vec<u8>> {
                    let mut pairs = Pairs::with_capacity(#count);
                    #(#write_impl)*
                    ::core::result::Result::Ok(pairs.finish())
                }
            }
        };
    })
}
