use {
    darling::{ast::Data, util::Ignored, Error, FromDeriveInput, FromField, Result},
    proc_macro2::TokenStream,
    syn::{ext::IdentExt, parse_quote, DeriveInput, Generics, Ident, Path, Type},
};

#[derive(FromField)]
#[darling(attributes(form))]
struct FieldArgs {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    rename: Option<String>,
    #[darling(default)]
    skip: bool,
}

#[derive(FromDeriveInput)]
#[darling(attributes(form), supports(struct_named))]
struct FormArgs {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, FieldArgs>,
    #[darling(rename = "crate", default)]
    crate_path: Option<Path>,
}

/// A field the codec reads and writes.
pub(crate) struct Field {
    pub(crate) member: Ident,
    pub(crate) ty: Type,
    /// Wire name used instead of the lower-cased identifier.
    pub(crate) rename: Option<String>,
}

impl Field {
    /// Identifier without a raw `r#` prefix.
    pub(crate) fn name(&self) -> String {
        self.member.unraw().to_string()
    }

    /// Key written on encode: the alias, else the lower-cased identifier.
    pub(crate) fn wire_name(&self) -> String {
        match &self.rename {
            Some(alias) => alias.clone(),
            None => self.name().to_lowercase(),
        }
    }
}

/// A struct with named fields, `#[form(skip)]` fields already removed.
pub(crate) struct Record {
    pub(crate) ident: Ident,
    pub(crate) generics: Generics,
    pub(crate) fields: Vec<Field>,
    /// Path to the `formwire` crate, `::formwire` unless `#[form(crate = "...")]`.
    pub(crate) crate_name: Path,
}

impl Record {
    pub(crate) fn parse(input: &DeriveInput) -> Result<Self> {
        let args = FormArgs::from_derive_input(input)?;
        let Data::Struct(fields) = args.data else {
            return Err(Error::unsupported_shape("enum").with_span(&args.ident));
        };

        let mut errors = Error::accumulator();
        let mut active = Vec::with_capacity(fields.len());
        for field in fields.fields {
            if field.skip {
                continue;
            }
            let Some(member) = field.ident else {
                errors.push(Error::unsupported_shape("unnamed field").with_span(&field.ty));
                continue;
            };
            if field.rename.as_deref() == Some("") {
                errors.push(Error::custom("`rename` must not be empty").with_span(&member));
                continue;
            }
            active.push(Field {
                member,
                ty: field.ty,
                rename: field.rename,
            });
        }

        errors.finish_with(Self {
            ident: args.ident,
            generics: args.generics,
            fields: active,
            crate_name: args.crate_path.unwrap_or_else(|| parse_quote!(::formwire)),
        })
    }

    /// The struct's generics with `bound` required of every field type.
    ///
    /// Bounds are only added when the struct has type parameters.
    pub(crate) fn bounded_generics(&self, bound: &TokenStream) -> Generics {
        let mut generics = self.generics.clone();
        if generics.type_params().next().is_none() {
            return generics;
        }
        let where_clause = generics.make_where_clause();
        for field in &self.fields {
            let ty = &field.ty;
            where_clause.predicates.push(parse_quote!(#ty: #bound));
        }
        generics
    }
}
