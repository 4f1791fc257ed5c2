use {
    crate::{common::Record, names},
    darling::Result,
    proc_macro2::TokenStream,
    quote::quote,
    syn::DeriveInput,
};

pub(crate) fn generate(input: DeriveInput) -> Result<TokenStream> {
    let record = Record::parse(&input)?;
    names::check_collisions(&record.fields)?;
    let crate_name = &record.crate_name;
    let generics = record.bounded_generics(&quote!(#crate_name::FormField));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let ident = &record.ident;

    let specs = record.fields.iter().map(|field| {
        let name = field.name();
        let rename = match &field.rename {
            Some(alias) => quote!(::core::option::Option::Some(#alias)),
            None => quote!(::core::option::Option::None),
        };
        quote!(FieldSpec::new(#name, #rename))
    });

    let read_arms = record.fields.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        quote! {
            #index => self.#member = FormField::read_field(values)?,
        }
    });

    let read_bytes_arms = record.fields.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        quote! {
            #index => self.#member = FormField::read_field_bytes(values)?,
        }
    });

    Ok(quote! {
        const _: () = {
            #[allow(unused_imports)]
            use #crate_name::{
                config::Config, record, FieldSpec, FormDecode, FormField, FormRecord, Result,
            };
            impl #impl_generics FormRecord for #ident #ty_generics #where_clause {
                const FIELDS: &'static [FieldSpec] = &[#(#specs),*];

                #[allow(unused_variables)]
                fn read_field(&mut self, index: usize, values: &[::std::string::String]) -> Result<()> {
                    match index {
                        #(#read_arms)*
                        _ => {}
                    }
                    ::core::result::Result::Ok(())
                }

                #[allow(unused_variables)]
                fn read_field_bytes(
                    &mut self,
                    index: usize,
                    values: &[::std::vec::Vec<u8>],
                ) -> Result<()> {
                    match index {
                        #(#read_bytes_arms)*
                        _ => {}
                    }
                    ::core::result::Result::Ok(())
                }
            }

            impl #impl_generics FormDecode for #ident #ty_generics #where_clause {
                #[inline]
                fn decode_form(&mut self, data: &[u8], config: &Config) -> Result<()> {
                    record::decode_record(self, data, config)
                }
            }
        };
    })
}
