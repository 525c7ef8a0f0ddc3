use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields, Lit, UnOp};

/// 单个字段解析出的约束
#[derive(Default)]
struct FieldConstraints {
    skip: bool,
    required: bool,
    min: Option<i64>,
    max: Option<i64>,
}

// 解析整数边界，支持 `min = 3`、`min = -3` 和 `min = "3"` 三种写法
fn parse_bound(meta: &ParseNestedMeta) -> syn::Result<i64> {
    let expr: Expr = meta.value()?.parse()?;
    match &expr {
        Expr::Lit(ExprLit { lit: Lit::Int(lit_int), .. }) => lit_int.base10_parse::<i64>(),
        Expr::Lit(ExprLit { lit: Lit::Str(lit_str), .. }) => {
            lit_str.value().trim().parse::<i64>().map_err(|_| {
                syn::Error::new(
                    lit_str.span(),
                    format!("invalid bound '{}', expected an integer", lit_str.value()),
                )
            })
        }
        Expr::Unary(ExprUnary { op: UnOp::Neg(_), expr: inner, .. }) => match inner.as_ref() {
            Expr::Lit(ExprLit { lit: Lit::Int(lit_int), .. }) => {
                lit_int.base10_parse::<i64>().map(|v| -v)
            }
            _ => Err(syn::Error::new_spanned(&expr, "expected an integer literal")),
        },
        _ => Err(syn::Error::new_spanned(&expr, "expected an integer literal")),
    }
}

// 解析 `required`，可以是裸标识或 `required = true` / `required = "true"`
fn parse_required(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if !meta.input.peek(syn::Token![=]) {
        return Ok(true);
    }

    let expr: Expr = meta.value()?.parse()?;
    match &expr {
        Expr::Lit(ExprLit { lit: Lit::Bool(lit_bool), .. }) => Ok(lit_bool.value),
        Expr::Lit(ExprLit { lit: Lit::Str(lit_str), .. }) => {
            lit_str.value().trim().parse::<bool>().map_err(|_| {
                syn::Error::new(
                    lit_str.span(),
                    format!("invalid required value '{}'", lit_str.value()),
                )
            })
        }
        _ => Err(syn::Error::new_spanned(&expr, "expected `true` or `false`")),
    }
}

fn parse_field_constraints(field: &syn::Field) -> syn::Result<FieldConstraints> {
    let mut constraints = FieldConstraints::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("constraint") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                constraints.skip = true;
            } else if meta.path.is_ident("required") {
                constraints.required = parse_required(&meta)?;
            } else if meta.path.is_ident("min") {
                constraints.min = Some(parse_bound(&meta)?);
            } else if meta.path.is_ident("max") {
                constraints.max = Some(parse_bound(&meta)?);
            } else {
                return Err(meta.error("unknown constraint, expected `required`, `min`, `max` or `skip`"));
            }
            Ok(())
        })?;

        if let (Some(min), Some(max)) = (constraints.min, constraints.max) {
            if min > max {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("min {} is greater than max {}", min, max),
                ));
            }
        }
    }

    Ok(constraints)
}

// 结构体上的 `#[record(kind = "...")]`，默认使用结构体名
fn parse_record_kind(input: &DeriveInput) -> syn::Result<String> {
    let mut kind = input.ident.to_string();

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let value: syn::LitStr = meta.value()?.parse()?;
                kind = value.value();
                Ok(())
            } else {
                Err(meta.error("unknown record attribute, expected `kind`"))
            }
        })?;
    }

    Ok(kind)
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let kind = parse_record_kind(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    Span::call_site(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                Span::call_site(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut descriptors = Vec::new();
    let mut accessors = Vec::new();

    for field in fields {
        let constraints = parse_field_constraints(field)?;
        if constraints.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = ident.to_string();
        let ty = &field.ty;

        let mut constraint_set = quote! { fieldguard_validator::ConstraintSet::new() };
        if constraints.required {
            constraint_set = quote! { #constraint_set.required() };
        }
        if let Some(min) = constraints.min {
            constraint_set = quote! { #constraint_set.min(#min) };
        }
        if let Some(max) = constraints.max {
            constraint_set = quote! { #constraint_set.max(#max) };
        }

        descriptors.push(quote! {
            .field(fieldguard_validator::FieldDescriptor::new(
                #field_name,
                <#ty as fieldguard_validator::AsFieldValue>::KIND,
                #constraint_set,
            ))
        });

        accessors.push(quote! {
            #field_name => ::core::option::Option::Some(
                fieldguard_validator::AsFieldValue::as_field_value(&self.#ident)
            ),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics fieldguard_validator::Record for #name #ty_generics #where_clause {
            fn kind() -> &'static str {
                #kind
            }

            fn schema() -> fieldguard_validator::SchemaResult<fieldguard_validator::RecordSchema> {
                fieldguard_validator::RecordSchema::builder(#kind)
                    #(#descriptors)*
                    .build()
            }

            fn field(&self, name: &str) -> ::core::option::Option<fieldguard_validator::FieldValue<'_>> {
                match name {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// 派生 `fieldguard_validator::Record`
///
/// ```ignore
/// #[derive(Record)]
/// #[record(kind = "User")]
/// struct User {
///     #[constraint(required, min = 3, max = 10)]
///     name: String,
///     #[constraint(required, min = 25, max = 50)]
///     age: i64,
///     #[constraint(skip)]
///     tags: Vec<String>,
/// }
/// ```
///
/// 字段类型必须是字符串或整数，否则无法编译。
#[proc_macro_derive(Record, attributes(record, constraint))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_record(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_err(input: DeriveInput) -> String {
        match expand_record(&input) {
            Ok(_) => panic!("expected expansion to fail"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_parse_field_constraints() {
        let field: syn::Field = parse_quote! {
            #[constraint(required, min = "3", max = 10)]
            name: String
        };
        let constraints = parse_field_constraints(&field).unwrap();
        assert!(constraints.required);
        assert!(!constraints.skip);
        assert_eq!(constraints.min, Some(3));
        assert_eq!(constraints.max, Some(10));

        let field: syn::Field = parse_quote! {
            #[constraint(required = "false", min = -5)]
            delta: i64
        };
        let constraints = parse_field_constraints(&field).unwrap();
        assert!(!constraints.required);
        assert_eq!(constraints.min, Some(-5));
        assert_eq!(constraints.max, None);

        let field: syn::Field = parse_quote! {
            #[constraint(skip)]
            tags: Vec<String>
        };
        assert!(parse_field_constraints(&field).unwrap().skip);
    }

    #[test]
    fn test_malformed_bound_literal() {
        let field: syn::Field = parse_quote! {
            #[constraint(min = "abc")]
            name: String
        };
        let err = parse_field_constraints(&field).err().unwrap();
        assert_eq!(err.to_string(), "invalid bound 'abc', expected an integer");

        let field: syn::Field = parse_quote! {
            #[constraint(max = 1.5)]
            name: String
        };
        let err = parse_field_constraints(&field).err().unwrap();
        assert_eq!(err.to_string(), "expected an integer literal");
    }

    #[test]
    fn test_inverted_bounds() {
        let field: syn::Field = parse_quote! {
            #[constraint(min = 10, max = 3)]
            name: String
        };
        let err = parse_field_constraints(&field).err().unwrap();
        assert_eq!(err.to_string(), "min 10 is greater than max 3");
    }

    #[test]
    fn test_unknown_constraint_key() {
        let field: syn::Field = parse_quote! {
            #[constraint(pattern = "x")]
            name: String
        };
        let err = parse_field_constraints(&field).err().unwrap();
        assert!(err.to_string().starts_with("unknown constraint"));

        let field: syn::Field = parse_quote! {
            #[constraint(required = "yes")]
            name: String
        };
        let err = parse_field_constraints(&field).err().unwrap();
        assert_eq!(err.to_string(), "invalid required value 'yes'");
    }

    #[test]
    fn test_rejects_non_struct_input() {
        let input: DeriveInput = parse_quote! {
            enum Shape { Circle, Square }
        };
        assert_eq!(expand_err(input), "Record can only be derived for structs");

        let input: DeriveInput = parse_quote! {
            struct Pair(String, i64);
        };
        assert_eq!(
            expand_err(input),
            "Record can only be derived for structs with named fields"
        );
    }

    #[test]
    fn test_record_kind_attribute() {
        let input: DeriveInput = parse_quote! {
            #[record(kind = "Item")]
            struct Product { name: String }
        };
        assert_eq!(parse_record_kind(&input).unwrap(), "Item");

        let input: DeriveInput = parse_quote! {
            #[record(label = "Item")]
            struct Product { name: String }
        };
        assert!(parse_record_kind(&input).is_err());
    }

    #[test]
    fn test_expansion_skips_fields() {
        let input: DeriveInput = parse_quote! {
            struct User {
                #[constraint(required, min = 3, max = 10)]
                name: String,
                #[constraint(skip)]
                tags: Vec<String>,
            }
        };
        let expanded = expand_record(&input).unwrap().to_string();
        assert!(expanded.contains("\"name\""));
        assert!(!expanded.contains("tags"));
    }
}
