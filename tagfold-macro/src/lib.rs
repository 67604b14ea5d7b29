extern crate proc_macro;

use {proc_macro::TokenStream, quote::ToTokens, syn::parse_macro_input};

/// Derive a discriminated union from a case mapping.
///
/// The body of the macro looks like an `enum` whose variants are written as lowercase case names
/// followed by a record of named fields. Each case name is the *tag* of that case at runtime, and
/// its fields are the case's *payload*:
///
/// ```
/// use tagfold::{adt, Cases, Tagged};
///
/// adt! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum Shape {
///         circle { r: f64 },
///         rectangle { w: f64, h: f64 },
///     }
/// }
///
/// let circle = Shape::circle(shape::Circle { r: 10.0 });
/// assert_eq!(circle.tag(), "circle");
/// assert_eq!(circle, Shape::Circle(shape::Circle { r: 10.0 }));
/// assert_eq!(Shape::CASES, &["circle", "rectangle"]);
/// ```
///
/// The invocation above expands to:
///
/// - `enum Shape { Circle(shape::Circle), Rectangle(shape::Rectangle) }`;
/// - a module `shape` holding the payload structs `Circle { pub r: f64 }` and
///   `Rectangle { pub w: f64, pub h: f64 }`, which carry the same `derive`s as the union;
/// - `Tagged` and `Cases` for `Shape`, and `Case<Shape>` plus `From` for every payload;
/// - the constructors `Shape::circle` and `Shape::rectangle`.
///
/// A case without fields may be written with empty braces or none at all. A mapping with no cases
/// produces an uninhabited union.
///
/// # Options
///
/// An `#[adt(...)]` attribute on the union configures the expansion:
///
/// - `tag = "kind"` names the tag field of the flat record representation (default `"type"`);
/// - `module = "shapes"` names the payload module (default: the union's name in snake case).
///
/// If the union derives serde's `Serialize` or `Deserialize`, it is internally tagged by the tag
/// field and each variant is renamed to its case name, so a value serializes as a flat record such
/// as `{"type": "circle", "r": 10.0}`.
///
/// # Errors
///
/// Declaring a case twice, declaring two cases that map onto the same variant name (like
/// `not_found` and `notFound`), naming a payload field like the tag field, and malformed options
/// are all compile errors.
#[proc_macro]
pub fn adt(input: TokenStream) -> TokenStream {
    let invocation = parse_macro_input!(input as tagfold_compiler::Invocation);
    match invocation.compile() {
        Ok(target) => target.into_token_stream().into(),
        Err(error) => error.to_compile_error().into(),
    }
}
