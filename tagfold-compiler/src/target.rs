//! The output of the compiler: a checked case mapping, ready to be emitted as Rust items.

use {
    lazy_static::lazy_static,
    proc_macro2::{Span, TokenStream},
    proc_macro_crate::{crate_name, FoundCrate},
    quote::{quote, ToTokens},
    std::fmt,
    syn::{Attribute, Field, Ident, Path, Visibility},
};

/// A discriminated union derived from a case mapping.
///
/// Emitting a [`Target`] produces:
///
/// - the union itself, an `enum` with one newtype variant per case;
/// - a module holding one payload struct per case, named like its variant, whose fields are the
///   case's fields (the payload without its tag);
/// - implementations of `tagfold::Tagged` and `tagfold::Cases` for the union, and of
///   `tagfold::Case` and `From` for every payload;
/// - one constructor function per case, named like the case, on the union.
#[derive(Debug, Clone)]
pub struct Target {
    /// Attributes of the union other than `derive` and `adt`.
    pub attrs: Vec<Attribute>,
    /// Derived traits, applied to the union and every payload.
    pub derives: Vec<Path>,
    /// Visibility of the union, its payload module and its constructors.
    pub vis: Visibility,
    /// The union's name.
    pub name: Ident,
    /// The payload module's name.
    pub module: Ident,
    /// The name of the tag field in the flat record representation.
    pub tag_field: String,
    /// The cases, in declaration order.
    pub variants: Vec<Variant>,
}

/// A single case of a [`Target`].
#[derive(Debug, Clone)]
pub struct Variant {
    /// The tag, i.e. the case name as written.
    pub tag: String,
    /// The variant name, which is also the payload struct name.
    pub variant: Ident,
    /// The constructor function name.
    pub constructor: Ident,
    /// Attributes placed on the payload struct.
    pub attrs: Vec<Attribute>,
    /// Payload fields, all public.
    pub fields: Vec<Field>,
}

impl Target {
    /// The tags of all cases, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.variants.iter().map(|v| v.tag.as_str())
    }

    /// Whether serde's derives are requested, in which case the union is tagged internally with
    /// the tag field, so that it serializes as a flat record.
    pub fn uses_serde(&self) -> bool {
        self.derives.iter().any(|path| {
            path.segments.last().map_or(false, |segment| {
                segment.ident == "Serialize" || segment.ident == "Deserialize"
            })
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}] in {} {{", self.name, self.tag_field, self.module)?;
        for (i, v) in self.variants.iter().enumerate() {
            write!(f, "{}{} => {} {{", if i == 0 { " " } else { ", " }, v.tag, v.variant)?;
            for (j, field) in v.fields.iter().enumerate() {
                let name = field.ident.as_ref().map(Ident::to_string).unwrap_or_default();
                let ty = field.ty.to_token_stream();
                write!(f, "{}{}: {}", if j == 0 { " " } else { ", " }, name, ty)?;
            }
            if v.fields.is_empty() {
                write!(f, "}}")?;
            } else {
                write!(f, " }}")?;
            }
        }
        if !self.variants.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "}}")
    }
}

fn runtime_crate() -> TokenStream {
    lazy_static! {
        static ref CRATE_NAME: String = match crate_name("tagfold") {
            Ok(FoundCrate::Name(name)) => name,
            // Integration tests and doctests of the runtime crate refer to it by its own name
            Ok(FoundCrate::Itself) | Err(_) => "tagfold".to_owned(),
        };
    }

    let ident = Ident::new(&CRATE_NAME, Span::call_site());
    quote!(::#ident)
}

impl ToTokens for Target {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let c = runtime_crate();
        let Target {
            attrs,
            derives,
            vis,
            name,
            module,
            tag_field,
            variants,
        } = self;

        let derive = if derives.is_empty() {
            quote!()
        } else {
            quote!(#[derive(#(#derives),*)])
        };
        let serde = self.uses_serde();

        let tags: Vec<&String> = variants.iter().map(|v| &v.tag).collect();
        let names: Vec<&Ident> = variants.iter().map(|v| &v.variant).collect();

        // The union and its payloads
        let serde_tag = if serde {
            quote!(#[serde(tag = #tag_field)])
        } else {
            quote!()
        };
        let enum_variants = variants.iter().map(|Variant { tag, variant, .. }| {
            let rename = if serde {
                quote!(#[serde(rename = #tag)])
            } else {
                quote!()
            };
            quote!(#rename #variant(#module::#variant))
        });
        let payloads = variants.iter().map(
            |Variant {
                 variant,
                 attrs,
                 fields,
                 ..
             }| {
                quote! {
                    #(#attrs)*
                    #derive
                    pub struct #variant { #(#fields),* }
                }
            },
        );

        quote! {
            #(#attrs)*
            #derive
            #serde_tag
            #vis enum #name {
                #(#enum_variants),*
            }

            #vis mod #module {
                #[allow(unused_imports)]
                use super::*;

                #(#payloads)*
            }
        }
        .to_tokens(tokens);

        // Tag lookup and the list of cases
        let tag_body = if variants.is_empty() {
            quote!(match *self {})
        } else {
            quote!(match self { #(#name::#names(_) => #tags,)* })
        };

        quote! {
            impl #c::Tagged for #name {
                const TAG_FIELD: &'static str = #tag_field;

                fn tag(&self) -> &str {
                    #tag_body
                }
            }

            impl #c::Cases for #name {
                const CASES: &'static [&'static str] = &[#(#tags),*];
            }
        }
        .to_tokens(tokens);

        // Selecting and injecting each case
        for Variant { tag, variant, .. } in variants {
            quote! {
                impl #c::Case<#name> for #module::#variant {
                    const TAG: &'static str = #tag;

                    fn inject(self) -> #name {
                        #name::#variant(self)
                    }

                    fn project(value: &#name) -> ::core::option::Option<&Self> {
                        match value {
                            #name::#variant(payload) => ::core::option::Option::Some(payload),
                            #[allow(unreachable_patterns)]
                            _ => ::core::option::Option::None,
                        }
                    }

                    fn extract(value: #name) -> ::core::result::Result<Self, #name> {
                        match value {
                            #name::#variant(payload) => ::core::result::Result::Ok(payload),
                            #[allow(unreachable_patterns)]
                            other => ::core::result::Result::Err(other),
                        }
                    }
                }

                impl ::core::convert::From<#module::#variant> for #name {
                    fn from(payload: #module::#variant) -> Self {
                        #name::#variant(payload)
                    }
                }
            }
            .to_tokens(tokens);
        }

        // Constructors
        let constructors = variants.iter().map(
            |Variant {
                 tag,
                 variant,
                 constructor,
                 ..
             }| {
                let doc = format!("Construct the `{}` case of [`{}`].", tag, name);
                quote! {
                    #[doc = #doc]
                    #[inline]
                    #vis fn #constructor(payload: #module::#variant) -> Self {
                        #name::#variant(payload)
                    }
                }
            },
        );

        quote! {
            #[allow(dead_code, non_snake_case)]
            impl #name {
                #(#constructors)*
            }
        }
        .to_tokens(tokens);
    }
}
