use syn::{
    braced,
    parse::{Error, Parse, ParseStream, Result},
    punctuated::Punctuated,
    token, Attribute, FieldsNamed, Ident, MetaNameValue, Path, Token, Visibility,
};

use crate::{AdtDef, AdtOption, CaseDef, Invocation, Spanned};

impl Parse for CaseDef {
    fn parse(input: ParseStream) -> Result<Self> {
        // <attrs> <name> { <field>: <type>, ... }, with the braces optional for empty payloads
        let attrs = input.call(Attribute::parse_outer)?;
        let name = input.parse::<Ident>()?;
        let fields = if input.peek(token::Brace) {
            input
                .parse::<FieldsNamed>()?
                .named
                .into_iter()
                .collect()
        } else {
            Vec::new()
        };
        Ok(CaseDef {
            attrs,
            name,
            fields,
        })
    }
}

impl Parse for Spanned<CaseDef> {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(input.parse::<CaseDef>()?.spanned())
    }
}

fn parse_options(attr: &Attribute) -> Result<Vec<AdtOption>> {
    attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?
        .into_iter()
        .map(|meta| {
            let key = meta
                .path
                .get_ident()
                .cloned()
                .ok_or_else(|| Error::new_spanned(&meta.path, "expected an option name"))?;
            Ok(AdtOption {
                key,
                value: meta.lit,
            })
        })
        .collect()
}

impl Parse for AdtDef {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attrs = Vec::new();
        let mut derives = Vec::new();
        let mut options = Vec::new();
        for attr in input.call(Attribute::parse_outer)? {
            if attr.path.is_ident("derive") {
                let paths =
                    attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
                derives.extend(paths);
            } else if attr.path.is_ident("adt") {
                options.extend(parse_options(&attr)?);
            } else {
                attrs.push(attr);
            }
        }

        let vis = input.parse::<Visibility>()?;
        input.parse::<Token![enum]>()?;
        let name = input.parse::<Ident>()?;

        let content;
        braced!(content in input);
        let cases = content
            .parse_terminated::<Spanned<CaseDef>, Token![,]>(Spanned::<CaseDef>::parse)?
            .into_iter()
            .collect();

        Ok(AdtDef {
            attrs,
            derives,
            options,
            vis,
            name,
            cases,
        })
    }
}

impl Parse for Invocation {
    fn parse(input: ParseStream) -> Result<Self> {
        let def = input.parse::<AdtDef>()?;
        Ok(Invocation { def })
    }
}
