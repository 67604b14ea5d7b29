mod common;

#[test]
fn duplicate_case() {
    expect_errors! {
        {
            enum Shape {
                circle { r: f64 },
                circle { d: f64 },
            }
        } => [
            CompileError::DuplicateCase("circle".to_owned()),
        ]
    };
}

#[test]
fn raw_and_plain_names_are_the_same_case() {
    expect_errors! {
        {
            enum Token {
                r#type,
                type_,
                r#type { name: String },
            }
        } => [
            CompileError::VariantCollision {
                first: "type".to_owned(),
                second: "type_".to_owned(),
                variant: "Type".to_owned(),
            },
            CompileError::DuplicateCase("type".to_owned()),
        ]
    };
}

#[test]
fn variant_collision() {
    expect_errors! {
        {
            enum Response {
                not_found,
                notFound,
            }
        } => [
            CompileError::VariantCollision {
                first: "not_found".to_owned(),
                second: "notFound".to_owned(),
                variant: "NotFound".to_owned(),
            },
        ]
    };
}

#[test]
fn invalid_case_name() {
    expect_errors! {
        {
            enum Weird {
                __,
                ok,
            }
        } => [
            CompileError::InvalidCaseName("__".to_owned()),
        ]
    };
}

#[test]
fn reserved_field() {
    expect_errors! {
        {
            enum Shape {
                circle { r#type: String, r: f64 },
            }
        } => [
            CompileError::ReservedField {
                case: "circle".to_owned(),
                field: "type".to_owned(),
            },
        ]
    };
}

#[test]
fn reserved_field_follows_tag_option() {
    expect_errors! {
        {
            #[adt(tag = "kind")]
            enum Shape {
                circle { kind: String },
                square { r#type: String },
            }
        } => [
            CompileError::ReservedField {
                case: "circle".to_owned(),
                field: "kind".to_owned(),
            },
        ]
    };
}

#[test]
fn bad_options() {
    expect_errors! {
        {
            #[adt(tag = "", color = "red", module = 3, tag = "kind")]
            enum Shape {}
        } => [
            CompileError::EmptyTagField,
            CompileError::UnknownOption("color".to_owned()),
            CompileError::ExpectedString("module".to_owned()),
            CompileError::DuplicateOption("tag".to_owned()),
        ]
    };
}

#[test]
fn invalid_module() {
    expect_errors! {
        {
            #[adt(module = "not a module")]
            enum Shape {}
        } => [
            CompileError::InvalidModule("not a module".to_owned()),
        ]
    };
}

#[test]
fn keyword_module() {
    expect_errors! {
        {
            enum Mod {}
        } => [
            CompileError::InvalidModule("mod".to_owned()),
        ]
    };
}

#[test]
fn all_errors_reported_at_once() {
    expect_errors! {
        {
            #[adt(shape = "round")]
            enum Shape {
                circle { r: f64 },
                circle,
                square { r#type: u8 },
            }
        } => [
            CompileError::UnknownOption("shape".to_owned()),
            CompileError::DuplicateCase("circle".to_owned()),
            CompileError::ReservedField {
                case: "square".to_owned(),
                field: "type".to_owned(),
            },
        ]
    };
}

#[test]
fn module_option_with_reserved_field() {
    expect_errors! {
        {
            #[adt(module = "shapes", tag = "kind")]
            enum Shape {
                circle { r: f64 },
                square { kind: u8 },
            }
        } => [
            CompileError::ReservedField {
                case: "square".to_owned(),
                field: "kind".to_owned(),
            },
        ]
    };
}
