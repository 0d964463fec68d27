//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了oxpack的派生宏，为组合类型和枚举生成类型描述符。

use darling::ast::Data;
use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Ident, Type};

/// 容器属性
#[derive(FromDeriveInput)]
#[darling(attributes(persist), supports(struct_named, enum_unit))]
struct PersistInput {
    ident: Ident,
    generics: syn::Generics,
    data: Data<PersistVariant, PersistField>,
    /// 覆盖默认的完全限定类型名
    #[darling(default)]
    name: Option<String>,
    /// 类型没有零参数构造路径
    #[darling(default)]
    no_default: bool,
}

/// 字段属性
#[derive(FromField)]
#[darling(attributes(persist))]
struct PersistField {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    skip: bool,
    #[darling(default)]
    rename: Option<String>,
    /// 字段是祖先类型，其成员并入当前类型
    #[darling(default)]
    base: bool,
}

#[derive(FromVariant)]
#[darling(attributes(persist))]
struct PersistVariant {
    ident: Ident,
}

/// 派生 `Persist`
///
/// 对具名字段结构体生成 `Persistable`、`Composite` 和 `Persist`；
/// 对无字段枚举生成 `PersistEnum` 和 `Persist`。
///
/// 结构体需要同时实现 `Clone`、`PartialEq`、`Debug`，
/// 未标注 `#[persist(no_default)]` 时还需要 `Default`。
///
/// # Example
///
/// ```ignore
/// #[derive(Persist, Clone, Debug, Default, PartialEq)]
/// #[persist(name = "shop.Order")]
/// struct Order {
///     id: i64,
///     #[persist(rename = "customer")]
///     buyer: String,
///     #[persist(skip)]
///     cached_total: Option<f64>,
///     #[persist(base)]
///     audit: Audit,
/// }
/// ```
#[proc_macro_derive(Persist, attributes(persist))]
pub fn derive_persist(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let input = match PersistInput::from_derive_input(&ast) {
        Ok(input) => input,
        Err(e) => return e.write_errors().into(),
    };

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "Persist cannot be derived for generic types; implement Persist by hand with Shape::Parameterized",
        )
        .to_compile_error()
        .into();
    }

    let name = &input.ident;
    let type_name = match &input.name {
        Some(type_name) => quote! { #type_name },
        None => quote! { concat!(module_path!(), "::", stringify!(#name)) },
    };

    let expanded = match &input.data {
        Data::Struct(fields) => expand_struct(name, &type_name, &fields.fields, input.no_default),
        Data::Enum(variants) => expand_enum(name, &type_name, variants),
    };

    TokenStream::from(expanded)
}

fn expand_struct(
    name: &Ident,
    type_name: &TokenStream2,
    fields: &[PersistField],
    no_default: bool,
) -> TokenStream2 {
    let mut own = Vec::new();
    let mut bases = Vec::new();
    for field in fields.iter().filter(|f| !f.skip) {
        let Some(ident) = &field.ident else {
            continue;
        };
        let ty = &field.ty;
        if field.base {
            bases.push(quote! {
                for member in <#ty as ::oxpack::introspect::Composite>::type_descriptor().members() {
                    members.push(member.lift::<#name, #ty>(|host| &host.#ident, |host| &mut host.#ident));
                }
            });
        } else {
            let member_name = field
                .rename
                .clone()
                .unwrap_or_else(|| ident.to_string());
            own.push(quote! {
                members.push(::oxpack::introspect::MemberDescriptor::new::<#name, #ty>(
                    #member_name,
                    |host| &host.#ident,
                    |host| &mut host.#ident,
                ));
            });
        }
    }

    let constructor = if no_default {
        quote! { None }
    } else {
        quote! {{
            fn construct() -> ::std::boxed::Box<dyn ::oxpack::introspect::Persistable> {
                ::std::boxed::Box::new(<#name as ::std::default::Default>::default())
            }
            Some(construct as ::oxpack::introspect::Constructor)
        }}
    };

    quote! {
        impl ::oxpack::introspect::Persistable for #name {
            fn type_name(&self) -> &'static str {
                <Self as ::oxpack::introspect::Composite>::TYPE_NAME
            }

            fn descriptor(&self) -> ::std::sync::Arc<::oxpack::introspect::TypeDescriptor> {
                <Self as ::oxpack::introspect::Composite>::type_descriptor()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn clone_boxed(&self) -> ::std::boxed::Box<dyn ::oxpack::introspect::Persistable> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn eq_dyn(&self, other: &dyn ::oxpack::introspect::Persistable) -> bool {
                other
                    .as_any()
                    .downcast_ref::<Self>()
                    .map_or(false, |other| self == other)
            }
        }

        impl ::oxpack::introspect::Composite for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn type_descriptor() -> ::std::sync::Arc<::oxpack::introspect::TypeDescriptor> {
                static DESCRIPTOR: ::std::sync::OnceLock<::std::sync::Arc<::oxpack::introspect::TypeDescriptor>> =
                    ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(DESCRIPTOR.get_or_init(|| {
                    let mut members = ::std::vec::Vec::new();
                    #(#own)*
                    #(#bases)*
                    ::std::sync::Arc::new(::oxpack::introspect::TypeDescriptor::new(
                        <Self as ::oxpack::introspect::Composite>::TYPE_NAME,
                        members,
                        #constructor,
                    ))
                }))
            }
        }

        impl ::oxpack::introspect::Persist for #name {
            fn shape() -> ::oxpack::introspect::Shape {
                ::oxpack::introspect::Shape::Object {
                    type_name: <Self as ::oxpack::introspect::Composite>::TYPE_NAME,
                    descriptor: <Self as ::oxpack::introspect::Composite>::type_descriptor,
                }
            }

            fn to_value(&self) -> ::oxpack::value::Value {
                ::oxpack::value::Value::Object(::std::boxed::Box::new(::std::clone::Clone::clone(self)))
            }

            fn from_value(value: ::oxpack::value::Value) -> ::oxpack::error::Result<Self> {
                ::oxpack::introspect::object_from_value::<Self>(value)
            }
        }
    }
}

fn expand_enum(name: &Ident, type_name: &TokenStream2, variants: &[PersistVariant]) -> TokenStream2 {
    if variants.is_empty() {
        return syn::Error::new_spanned(name, "Persist enums need at least one variant")
            .to_compile_error();
    }

    let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
    let labels: Vec<String> = idents.iter().map(|i| i.to_string()).collect();
    let ordinals: Vec<u32> = (0..idents.len() as u32).collect();

    quote! {
        impl ::oxpack::introspect::PersistEnum for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn enum_descriptor() -> ::std::sync::Arc<::oxpack::introspect::EnumDescriptor> {
                static DESCRIPTOR: ::std::sync::OnceLock<::std::sync::Arc<::oxpack::introspect::EnumDescriptor>> =
                    ::std::sync::OnceLock::new();
                ::std::sync::Arc::clone(DESCRIPTOR.get_or_init(|| {
                    ::std::sync::Arc::new(::oxpack::introspect::EnumDescriptor::new(
                        <Self as ::oxpack::introspect::PersistEnum>::TYPE_NAME,
                        ::std::vec![#(#labels),*],
                    ))
                }))
            }

            fn ordinal(&self) -> u32 {
                match self {
                    #(#name::#idents => #ordinals,)*
                }
            }

            fn from_ordinal(ordinal: u32) -> ::std::option::Option<Self> {
                match ordinal {
                    #(#ordinals => ::std::option::Option::Some(#name::#idents),)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::oxpack::introspect::Persist for #name {
            fn shape() -> ::oxpack::introspect::Shape {
                ::oxpack::introspect::Shape::Enum {
                    descriptor: <Self as ::oxpack::introspect::PersistEnum>::enum_descriptor(),
                    nullable: false,
                }
            }

            fn to_value(&self) -> ::oxpack::value::Value {
                ::oxpack::introspect::enum_to_value(self)
            }

            fn from_value(value: ::oxpack::value::Value) -> ::oxpack::error::Result<Self> {
                ::oxpack::introspect::enum_from_value::<Self>(value)
            }
        }
    }
}
