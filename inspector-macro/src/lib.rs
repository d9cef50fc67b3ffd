use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, format_ident, quote};
use syn::parse::ParseStream;
use syn::{
    Attribute, Data, DeriveInput, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat,
    ReturnType, Token, Type, Visibility, parse_macro_input,
};

/// Registers the `#[action]` methods of an inherent impl block with the
/// inspector by implementing `lilium_inspector::HasActions`.
///
/// ```ignore
/// #[actions]
/// impl Spawner {
///     #[action]
///     pub fn reset(&mut self) { ... }
///
///     #[action("Spawn Wave")]
///     pub fn spawn_wave(&mut self, count: i32, tint: Color) -> Result<(), SpawnError> { ... }
///
///     #[action(label = "Rename")]
///     fn rename(&mut self, name: &str) { ... }
/// }
/// ```
///
/// Methods are registered in source order. Methods without a `self`
/// receiver are registered as static and methods with generic parameters
/// as generic; the inspector lists neither. Parameters passed by `&mut` are
/// listed but block the action. A `Result` return value with a `Display`
/// error turns `Err` into an invocation failure; other return values are
/// ignored.
#[proc_macro_attribute]
pub fn actions(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[actions] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let mut input = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &input.trait_ {
        return syn::Error::new_spanned(path, "#[actions] must be placed on an inherent impl block")
            .to_compile_error()
            .into();
    }
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[actions] does not support generic impl blocks",
        )
        .to_compile_error()
        .into();
    }

    let mut specs = Vec::new();
    let mut errors = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        match take_action_attr(&mut method.attrs) {
            Ok(Some(label)) => match action_spec(method, label) {
                Ok(spec) => specs.push(spec),
                Err(e) => errors.push(e.to_compile_error()),
            },
            Ok(None) => {}
            Err(e) => errors.push(e.to_compile_error()),
        }
    }

    let self_ty = &input.self_ty;
    let expanded = quote! {
        #input

        impl ::lilium_inspector::HasActions for #self_ty {
            fn actions() -> ::std::vec::Vec<::lilium_inspector::ActionSpec> {
                #[allow(unused_imports)]
                use ::lilium_inspector::param::{SupportedParam as _, UnsupportedParam as _};
                #[allow(unused_imports)]
                use ::lilium_inspector::invoke::{FallibleOutcome as _, PlainOutcome as _};

                ::std::vec![#(#specs),*]
            }
        }

        #(#errors)*
    };

    expanded.into()
}

/// Label override of an `#[action]` marker.
enum Marker {
    Plain,
    Labeled(LitStr),
}

/// Removes `#[action]` attributes from a method. Returns the marker if present.
fn take_action_attr(attrs: &mut Vec<Attribute>) -> syn::Result<Option<Marker>> {
    let mut marker = None;
    let mut error = None;
    attrs.retain(|attr| {
        if !attr.path().is_ident("action") {
            return true;
        }
        match parse_marker(attr) {
            Ok(m) => marker = Some(m),
            Err(e) => error = Some(e),
        }
        false
    });
    match error {
        Some(e) => Err(e),
        None => Ok(marker),
    }
}

fn parse_marker(attr: &Attribute) -> syn::Result<Marker> {
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(Marker::Plain);
    }
    attr.parse_args_with(|input: ParseStream| {
        if input.is_empty() {
            return Ok(Marker::Plain);
        }
        if input.peek(LitStr) {
            return Ok(Marker::Labeled(input.parse()?));
        }
        let key: Ident = input.parse()?;
        if key != "label" {
            return Err(syn::Error::new_spanned(
                key,
                "expected `#[action]`, `#[action(\"Label\")]` or `#[action(label = \"Label\")]`",
            ));
        }
        input.parse::<Token![=]>()?;
        Ok(Marker::Labeled(input.parse()?))
    })
}

/// How a parameter reaches the method.
enum Passing {
    /// Owned value, moved in.
    Value,
    /// `&T` or `&str`, borrowed from the extracted value.
    Shared,
    /// `&mut T`.
    Exclusive,
}

struct ParamInfo {
    name: String,
    type_str: String,
    /// Type extracted from the cached argument (`String` for `&str`).
    value_ty: Option<Type>,
    passing: Passing,
}

/// Builds the `ActionSpec` expression for one method.
fn action_spec(method: &ImplItemFn, marker: Marker) -> syn::Result<TokenStream2> {
    let sig = &method.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "async methods cannot be actions"));
    }
    if let Some(unsafety) = &sig.unsafety {
        return Err(syn::Error::new_spanned(unsafety, "unsafe methods cannot be actions"));
    }

    let ident = &sig.ident;
    let name = ident.to_string();
    let is_static = match sig.receiver() {
        None => true,
        Some(receiver) => {
            if !matches!(*receiver.ty, Type::Reference(_)) {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "actions must take `&self` or `&mut self`",
                ));
            }
            false
        }
    };

    let params: Vec<ParamInfo> = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(i, pat_type)| param_info(i, &pat_type.pat, &pat_type.ty))
        .collect();

    let has_impl_trait = sig.inputs.iter().any(|arg| match arg {
        FnArg::Typed(pat_type) => contains_impl_trait(&pat_type.ty),
        FnArg::Receiver(_) => false,
    });
    let is_generic = !sig.generics.params.is_empty() || has_impl_trait;

    let label = match marker {
        Marker::Plain => quote! {},
        Marker::Labeled(lit) => quote! { .label(#lit) },
    };
    let visibility = visibility_tokens(&method.vis);
    let return_type = match &sig.output {
        ReturnType::Default => "()".to_owned(),
        ReturnType::Type(_, ty) => type_string(ty),
    };

    let describes = params.iter().map(|param| describe_tokens(param, is_generic));

    let mut flags = TokenStream2::new();
    if is_static {
        flags.extend(quote! { .static_member() });
    }
    if is_generic {
        flags.extend(quote! { .generic() });
    }

    let all_sized = params.iter().all(|p| p.value_ty.is_some());
    let invoker = if is_static || is_generic || !all_sized {
        quote! {}
    } else {
        invoker_tokens(ident, &params)
    };

    Ok(quote! {
        ::lilium_inspector::ActionSpec::builder::<Self>(#name)
            #label
            .visibility(#visibility)
            .returns(#return_type)
            #(.param(#describes))*
            #flags
            #invoker
            .build()
    })
}

fn param_info(index: usize, pat: &Pat, ty: &Type) -> ParamInfo {
    let name = match pat {
        Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
        _ => format!("arg{index}"),
    };
    let type_str = type_string(ty);

    let (value_ty, passing) = match ty {
        Type::Reference(reference) if reference.mutability.is_some() => {
            (sized_type(&reference.elem), Passing::Exclusive)
        }
        Type::Reference(reference) => {
            if is_str(&reference.elem) {
                (Some(syn::parse_quote!(::std::string::String)), Passing::Shared)
            } else {
                (sized_type(&reference.elem), Passing::Shared)
            }
        }
        other => (Some(other.clone()), Passing::Value),
    };

    ParamInfo {
        name,
        type_str,
        value_ty,
        passing,
    }
}

/// `None` for types that cannot be held by value.
fn sized_type(ty: &Type) -> Option<Type> {
    match ty {
        Type::Slice(_) | Type::TraitObject(_) => None,
        Type::Path(path) if path.qself.is_none() && path.path.is_ident("str") => None,
        other => Some(other.clone()),
    }
}

fn is_str(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("str"))
}

fn contains_impl_trait(ty: &Type) -> bool {
    match ty {
        Type::ImplTrait(_) => true,
        Type::Reference(reference) => contains_impl_trait(&reference.elem),
        Type::Paren(paren) => contains_impl_trait(&paren.elem),
        _ => false,
    }
}

fn describe_tokens(param: &ParamInfo, is_generic: bool) -> TokenStream2 {
    let name = &param.name;
    let type_str = &param.type_str;
    let pass = match param.passing {
        Passing::Exclusive => quote! { ::lilium_inspector::PassMode::ByMutRef },
        Passing::Value | Passing::Shared => quote! { ::lilium_inspector::PassMode::ByValue },
    };
    match &param.value_ty {
        // Generic parameter types are not nameable from `actions()`.
        Some(value_ty) if !is_generic => quote! {
            (&::lilium_inspector::param::Probe::<#value_ty>::new()).describe(#name, #type_str, #pass)
        },
        _ => quote! {
            ::lilium_inspector::ParamDescriptor::unsupported(#name, #type_str).with_pass(#pass)
        },
    }
}

fn invoker_tokens(method: &Ident, params: &[ParamInfo]) -> TokenStream2 {
    let mut extracts = Vec::new();
    let mut call_args = Vec::new();
    for (i, param) in params.iter().enumerate() {
        let var = format_ident!("__a{}", i);
        if let Some(value_ty) = &param.value_ty {
            let binding = match param.passing {
                Passing::Exclusive => quote! { mut #var },
                Passing::Value | Passing::Shared => quote! { #var },
            };
            extracts.push(quote! {
                let #binding: #value_ty =
                    (&::lilium_inspector::param::Probe::<#value_ty>::new()).extract(__args, #i)?;
            });
        }
        call_args.push(match param.passing {
            Passing::Value => quote! { #var },
            Passing::Shared => quote! { &#var },
            Passing::Exclusive => quote! { &mut #var },
        });
    }

    quote! {
        .invoker(|__target: &mut Self, __args: &[::lilium_inspector::ParamValue]| {
            #(#extracts)*
            let __ret = __target.#method(#(#call_args),*);
            (&::lilium_inspector::invoke::Outcome(&__ret)).result()
        })
    }
}

fn visibility_tokens(vis: &Visibility) -> TokenStream2 {
    match vis {
        Visibility::Public(_) => quote! { ::lilium_inspector::Visibility::Public },
        Visibility::Restricted(restricted)
            if restricted.in_token.is_none() && restricted.path.is_ident("crate") =>
        {
            quote! { ::lilium_inspector::Visibility::Crate }
        }
        Visibility::Restricted(_) => quote! { ::lilium_inspector::Visibility::Restricted },
        Visibility::Inherited => quote! { ::lilium_inspector::Visibility::Private },
    }
}

/// Renders a type the way it is usually written (`&mut Vec<i32>`, not `& mut Vec < i32 >`).
fn type_string(ty: &Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = out.chars().last();
            let next = chars.get(i + 1).copied();
            let ident_char = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
            if ident_char(prev) && ident_char(next) {
                out.push(' ');
            }
            continue;
        }
        out.push(c);
        if c == ',' || c == ';' {
            out.push(' ');
        }
    }
    out
}

/// Derives `ParamEnum` and `ParamType` for a fieldless enum.
///
/// ```ignore
/// #[derive(Clone, Copy, ParamEnum)]
/// enum Formation {
///     Line,
///     Wedge,
///     Circle,
/// }
/// ```
///
/// The first variant is the default value.
#[proc_macro_derive(ParamEnum)]
pub fn derive_param_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let name_str = name.to_string();

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "ParamEnum cannot be derived for generic enums")
            .to_compile_error()
            .into();
    }

    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "ParamEnum can only be derived for enums")
            .to_compile_error()
            .into();
    };
    if data.variants.is_empty() {
        return syn::Error::new_spanned(&input.ident, "ParamEnum needs at least one variant")
            .to_compile_error()
            .into();
    }
    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, syn::Fields::Unit))
    {
        return syn::Error::new_spanned(variant, "ParamEnum variants cannot have fields")
            .to_compile_error()
            .into();
    }

    let idents: Vec<&Ident> = data.variants.iter().map(|v| &v.ident).collect();
    let names: Vec<String> = idents.iter().map(|v| v.to_string()).collect();
    let indices: Vec<usize> = (0..idents.len()).collect();

    let expanded = quote! {
        impl ::lilium_inspector::param::ParamEnum for #name {
            const TYPE_NAME: &'static str = #name_str;
            const VARIANTS: &'static [&'static str] = &[#(#names),*];

            fn index(self) -> usize {
                match self {
                    #(Self::#idents => #indices,)*
                }
            }

            fn from_index(index: usize) -> ::core::option::Option<Self> {
                match index {
                    #(#indices => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::lilium_inspector::ParamType for #name {
            fn kind() -> ::lilium_inspector::ParamKind {
                ::lilium_inspector::param::enum_kind::<Self>()
            }

            fn from_value(value: &::lilium_inspector::ParamValue) -> ::core::option::Option<Self> {
                ::lilium_inspector::param::enum_from_value::<Self>(value)
            }

            fn into_value(self) -> ::lilium_inspector::ParamValue {
                ::lilium_inspector::ParamValue::Enum(
                    <Self as ::lilium_inspector::param::ParamEnum>::index(self),
                )
            }
        }
    };

    expanded.into()
}
