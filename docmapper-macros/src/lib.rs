//! Procedural macros for the docmapper project.
//!
//! This crate provides the [`document!`] macro: a declarative host-type
//! description expanded, at definition time, into a struct wrapping a
//! `Record`, a lazily built per-type `Schema`, per-field wrapper accessors
//! routed through the validator chain, and the `Model` implementation.
//!
//! # Syntax
//!
//! ```ignore
//! docmapper::document! {
//!     pub struct Person in "people" {
//!         name: String { required: true },
//!         age: Int,
//!     }
//!
//!     impl {
//!         fn before_save(&mut self) -> docmapper::error::MapperResult<()> {
//!             Ok(())
//!         }
//!     }
//! }
//! ```
//!
//! The `in "people"` collection binding is optional (the default is the
//! pluralized lower-first-letter type name) and the trailing `impl` block
//! splices lifecycle hook overrides into the generated `Model` impl.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Expr, Ident, ImplItem, LitStr, Token, Visibility, braced,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    token,
};

struct DocumentInput {
    attrs: Vec<Attribute>,
    vis: Visibility,
    name: Ident,
    collection: Option<LitStr>,
    fields: Vec<DocumentField>,
    hooks: Vec<ImplItem>,
}

struct DocumentField {
    name: Ident,
    field_type: Ident,
    rules: Vec<(Ident, Expr)>,
}

struct RulePair {
    name: Ident,
    arg: Expr,
}

impl Parse for DocumentInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![struct]>()?;
        let name: Ident = input.parse()?;

        let collection = if input.peek(Token![in]) {
            input.parse::<Token![in]>()?;
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };

        let body;
        braced!(body in input);
        let fields = body
            .parse_terminated(DocumentField::parse, Token![,])?
            .into_iter()
            .collect();

        let hooks = if input.peek(Token![impl]) {
            input.parse::<Token![impl]>()?;
            let hook_body;
            braced!(hook_body in input);

            let mut items = Vec::new();
            while !hook_body.is_empty() {
                items.push(hook_body.parse::<ImplItem>()?);
            }
            items
        } else {
            Vec::new()
        };

        Ok(Self { attrs, vis, name, collection, fields, hooks })
    }
}

impl Parse for DocumentField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let field_type: Ident = input.parse()?;

        let rules = if input.peek(token::Brace) {
            let rule_body;
            braced!(rule_body in input);
            let pairs: Punctuated<RulePair, Token![,]> =
                rule_body.parse_terminated(RulePair::parse, Token![,])?;

            pairs
                .into_iter()
                .map(|pair| (pair.name, pair.arg))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self { name, field_type, rules })
    }
}

impl Parse for RulePair {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let arg: Expr = input.parse()?;

        Ok(Self { name, arg })
    }
}

fn field_type_path(field_type: &Ident) -> syn::Result<proc_macro2::TokenStream> {
    let variant = match field_type.to_string().as_str() {
        "Any" => "Any",
        "String" => "String",
        "Int" | "Integer" => "Int",
        "Double" | "Float" => "Double",
        "Bool" | "Boolean" => "Bool",
        "ObjectId" => "ObjectId",
        "Array" => "Array",
        "Document" => "Document",
        "DateTime" => "DateTime",
        other => {
            return Err(syn::Error::new(
                field_type.span(),
                format!("unsupported field type `{other}`"),
            ));
        }
    };

    let variant = Ident::new(variant, field_type.span());
    Ok(quote!(docmapper::field::FieldType::#variant))
}

/// Expands a declarative document description into a mapped host type.
#[proc_macro]
pub fn document(input: TokenStream) -> TokenStream {
    let DocumentInput { attrs, vis, name, collection, fields, hooks } =
        parse_macro_input!(input as DocumentInput);

    let type_name = name.to_string();

    let collection_call = collection
        .as_ref()
        .map(|lit| quote!(.collection(#lit)));

    let mut field_calls = Vec::new();
    let mut accessors = Vec::new();
    let mut declares_id_accessor = false;

    for field in &fields {
        let field_name = field.name.to_string();
        let field_type = match field_type_path(&field.field_type) {
            Ok(path) => path,
            Err(err) => return err.to_compile_error().into(),
        };

        let rule_entries = field.rules.iter().map(|(rule, arg)| {
            let rule_name = rule.to_string();
            quote!((#rule_name, docmapper::bson::Bson::from(#arg)))
        });

        field_calls.push(quote! {
            .field(#field_name, #field_type, ::std::vec![#(#rule_entries),*])
        });

        if field_name == "id" {
            declares_id_accessor = true;
        }

        let getter = &field.name;
        let setter = format_ident!("set_{}", field.name);
        let getter_doc = format!("Current value of `{field_name}` (nil until assigned).");
        let setter_doc = format!(
            "Assigns `{field_name}` after running it through the validator chain; \
             a rejected value leaves the prior one untouched."
        );

        accessors.push(quote! {
            #[doc = #getter_doc]
            pub fn #getter(&self) -> &docmapper::bson::Bson {
                self.record.value(#field_name)
            }

            #[doc = #setter_doc]
            pub fn #setter(
                &mut self,
                value: impl ::core::convert::Into<docmapper::bson::Bson>,
            ) -> docmapper::error::MapperResult<()> {
                self.record.set(#field_name, value.into())
            }
        });
    }

    // A declared `id` field takes the accessor slot; otherwise expose the
    // implicit identifier under the same name.
    let id_accessor = (!declares_id_accessor).then(|| {
        quote! {
            /// The identifier value (nil until first persisted).
            pub fn id(&self) -> &docmapper::bson::Bson {
                self.record.id()
            }
        }
    });

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone)]
        #vis struct #name {
            record: docmapper::record::Record,
        }

        impl #name {
            /// Creates a transient instance with every field nil.
            pub fn new() -> Self {
                Self {
                    record: docmapper::record::Record::new(
                        <Self as docmapper::model::Model>::schema(),
                    ),
                }
            }

            /// The registered field names, in registration order (`_id` first).
            pub fn fields() -> ::std::vec::Vec<&'static str> {
                <Self as docmapper::model::Model>::schema().field_names()
            }

            #id_accessor

            #(#accessors)*
        }

        impl ::core::default::Default for #name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl docmapper::model::Model for #name {
            fn schema() -> &'static docmapper::schema::Schema {
                static SCHEMA: ::std::sync::LazyLock<docmapper::schema::Schema> =
                    ::std::sync::LazyLock::new(|| {
                        docmapper::schema::Schema::builder(#type_name)
                            #collection_call
                            #(#field_calls)*
                            .build()
                    });
                &SCHEMA
            }

            fn record(&self) -> &docmapper::record::Record {
                &self.record
            }

            fn record_mut(&mut self) -> &mut docmapper::record::Record {
                &mut self.record
            }

            fn from_record(record: docmapper::record::Record) -> Self {
                Self { record }
            }

            #(#hooks)*
        }
    }
    .into()
}
