use {
    proc_macro2::Span,
    syn::{ext::IdentExt, Attribute, Error, Field, Ident, Lit, Path, Visibility},
};

use crate::{
    names,
    target::{Target, Variant},
    CompileError, Spanned, DEFAULT_TAG_FIELD,
};

/// A shim for parsing the root level of a macro invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub def: AdtDef,
}

impl Invocation {
    /// Check the invocation and lower it into its [`Target`].
    pub fn compile(&self) -> Result<Target, Error> {
        self.def.compile()
    }
}

/// The surface syntax of a case mapping, as written inside `adt! { ... }`.
///
/// The `derive` and `adt` attributes are pulled out of `attrs` while parsing, since the former is
/// forwarded to every payload struct and the latter configures the compiler.
#[derive(Debug, Clone)]
pub struct AdtDef {
    pub attrs: Vec<Attribute>,
    pub derives: Vec<Path>,
    pub options: Vec<AdtOption>,
    pub vis: Visibility,
    pub name: Ident,
    pub cases: Vec<Spanned<CaseDef>>,
}

/// One `key = "value"` entry of an `#[adt(...)]` attribute.
#[derive(Debug, Clone)]
pub struct AdtOption {
    pub key: Ident,
    pub value: Lit,
}

/// A single case: its name, which is also its tag, and its payload fields.
#[derive(Debug, Clone)]
pub struct CaseDef {
    pub attrs: Vec<Attribute>,
    pub name: Ident,
    pub fields: Vec<Field>,
}

impl CaseDef {
    /// The tag this case is identified by at runtime.
    pub fn tag(&self) -> String {
        self.name.unraw().to_string()
    }

    pub(crate) fn spanned(self) -> Spanned<CaseDef> {
        let span: Span = self.name.span();
        Spanned { inner: self, span }
    }
}

struct Options {
    tag_field: String,
    module: Option<Ident>,
}

impl AdtDef {
    /// Check the case mapping and lower it into its [`Target`].
    ///
    /// All problems found are reported at once, each spanned to the piece of syntax at fault.
    pub fn compile(&self) -> Result<Target, Error> {
        let mut errors = Vec::new();

        let Options { tag_field, module } = self.options(&mut errors);
        let module = match module {
            Some(module) => module,
            None => {
                let module = names::to_snake_case(&self.name.unraw().to_string());
                if syn::parse_str::<Ident>(&module).is_ok() {
                    Ident::new(&module, self.name.span())
                } else {
                    errors.push(Spanned {
                        inner: CompileError::InvalidModule(module),
                        span: self.name.span(),
                    });
                    Ident::new("payload", self.name.span())
                }
            }
        };

        let mut variants: Vec<Variant> = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let tag = case.tag();
            let mut error = |inner| errors.push(Spanned { inner, span: case.span });

            if variants.iter().any(|v| v.tag == tag) {
                error(CompileError::DuplicateCase(tag));
                continue;
            }

            let variant_name = names::to_upper_camel_case(&tag);
            if !names::is_type_name(&variant_name) {
                error(CompileError::InvalidCaseName(tag));
                continue;
            }
            if let Some(first) = variants.iter().find(|v| v.variant == variant_name) {
                error(CompileError::VariantCollision {
                    first: first.tag.clone(),
                    second: tag,
                    variant: variant_name,
                });
                continue;
            }

            for field in &case.fields {
                let is_reserved = field
                    .ident
                    .as_ref()
                    .map_or(false, |ident| ident.unraw() == tag_field);
                if is_reserved {
                    error(CompileError::ReservedField {
                        case: tag.clone(),
                        field: tag_field.clone(),
                    });
                }
            }

            let fields = case
                .fields
                .iter()
                .cloned()
                .map(|mut field| {
                    field.vis = syn::parse_quote!(pub);
                    field
                })
                .collect();

            variants.push(Variant {
                tag,
                variant: Ident::new(&variant_name, case.span),
                constructor: case.name.clone(),
                attrs: case.attrs.clone(),
                fields,
            });
        }

        let mut maybe_error: Option<Error> = None;
        for reported_error in errors.drain(..) {
            let new_error = Error::new(reported_error.span, reported_error.inner.to_string());
            match maybe_error.as_mut() {
                None => maybe_error = Some(new_error),
                Some(accumulated_errors) => accumulated_errors.combine(new_error),
            }
        }

        match maybe_error {
            Some(error) => Err(error),
            None => Ok(Target {
                attrs: self.attrs.clone(),
                derives: self.derives.clone(),
                vis: self.vis.clone(),
                name: self.name.clone(),
                module,
                tag_field,
                variants,
            }),
        }
    }

    fn options(&self, errors: &mut Vec<Spanned<CompileError>>) -> Options {
        let mut options = Options {
            tag_field: DEFAULT_TAG_FIELD.to_owned(),
            module: None,
        };
        let mut seen: Vec<String> = Vec::new();

        for option in &self.options {
            let key = option.key.to_string();
            let span = option.key.span();
            let mut error = |inner| errors.push(Spanned { inner, span });

            if seen.contains(&key) {
                error(CompileError::DuplicateOption(key));
                continue;
            }
            seen.push(key.clone());

            match (key.as_str(), &option.value) {
                ("tag", Lit::Str(value)) => {
                    let value = value.value();
                    if value.is_empty() {
                        error(CompileError::EmptyTagField);
                    } else {
                        options.tag_field = value;
                    }
                }
                ("module", Lit::Str(value)) => {
                    let name = value.value();
                    if syn::parse_str::<Ident>(&name).is_ok() {
                        options.module = Some(Ident::new(&name, value.span()));
                    } else {
                        error(CompileError::InvalidModule(name));
                    }
                }
                ("tag", _) | ("module", _) => error(CompileError::ExpectedString(key.clone())),
                _ => error(CompileError::UnknownOption(key.clone())),
            }
        }

        options
    }
}
