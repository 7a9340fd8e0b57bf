//! Derive macro for the `Project` trait.
//!
//! This crate provides a derive macro for automatically implementing the
//! `Project` and `Field` traits from the `tagview` crate. The generated code
//! consists of a static field table holding every field's raw annotations and
//! an accessor that hands the projector one field at a time.
//!
//! # Supported Types
//!
//! The derive macro supports:
//! - Structs with named fields
//! - Tuple structs (fields are identified as `"0"`, `"1"`, ...)
//! - Unit structs
//!
//! Enums and unions are rejected.
//!
//! # Examples
//!
//! ## Struct with Named Fields
//!
//! ```ignore
//! use tagview::Project;
//!
//! #[derive(Project)]
//! struct User {
//!     #[project(tags = "public,admin", json = "user_name")]
//!     name: String,
//!     #[project(tags = "admin", omitempty)]
//!     email: String,
//! }
//! ```
//!
//! ## Tuple Struct
//!
//! ```ignore
//! use tagview::Project;
//!
//! #[derive(Project)]
//! struct Pair(#[project(tags = "a")] u32, #[project(tags = "b")] u32);
//! ```
//!
//! # Field Attributes
//!
//! - `#[project(tags = "a,b")]`: the comma-separated selector tags.
//! - `#[project(json = "name,option,...")]`: the naming string, verbatim.
//! - `#[project(rename = "name")]`: the output key.
//! - `#[project(omitempty)]`: drop the field when its value is empty.
//!
//! `json` cannot be combined with `rename` or `omitempty`. When no output key
//! is given through `project`, `#[serde(rename = "name")]` (or the
//! `serialize` half of `rename(...)`) supplies it; other `serde` keys are
//! ignored.
//!
//! # Container Attributes
//!
//! - `#[project_crate(path)]`: the path of the `tagview` crate, for crates
//!   that re-export it.
//! - `#[project(marshal)]`: the struct implements `tagview::Marshal` and is
//!   marshaled wherever it is reached below the root of a projection,
//!   including behind generic parameters and inside containers.
//!
//! ```compile_fail
//! # use tagview::Project;
//! // This will fail to compile - enums cannot be projected
//! #[derive(Project)]
//! enum Shape {
//!     Circle { radius: f64 },
//! }
//! ```
//!
//! ```compile_fail
//! # use tagview::Project;
//! // This will fail to compile - `json` and `rename` are exclusive
//! #[derive(Project)]
//! struct Conflict {
//!     #[project(json = "a", rename = "b")]
//!     value: u32,
//! }
//! ```
//!
//! ```compile_fail
//! # use tagview::Project;
//! // This will fail to compile - `marshal` requires a `Marshal` impl
//! #[derive(Project)]
//! #[project(marshal)]
//! struct Unmarshalable {
//!     #[project(tags = "a")]
//!     value: u32,
//! }
//! ```
//!
//! ```compile_fail
//! # use tagview::Project;
//! // This will fail to compile - unknown key
//! #[derive(Project)]
//! struct Unknown {
//!     #[project(tag = "a")]
//!     value: u32,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, Index, LitStr, Member, Token,
    ext::IdentExt as _, meta::ParseNestedMeta, parse_macro_input,
};

/// The `project` and `serde` annotations of one field.
#[derive(Default)]
struct FieldAttributes {
    tags: Option<String>,
    json: Option<String>,
    rename: Option<String>,
    omitempty: bool,
    serde_rename: Option<String>,
}

impl FieldAttributes {
    fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut attributes = Self::default();

        for attr in &field.attrs {
            if attr.path().is_ident("project") {
                attr.parse_nested_meta(|meta| {
                    attributes.parse_project(&meta)
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| attributes.parse_serde(&meta))?;
            }
        }

        if attributes.json.is_some()
            && (attributes.rename.is_some() || attributes.omitempty)
        {
            return Err(syn::Error::new_spanned(
                field,
                "`json` cannot be combined with `rename` or `omitempty`",
            ));
        }

        Ok(attributes)
    }

    fn parse_project(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("tags") {
            set_once(meta, &mut self.tags)
        } else if meta.path.is_ident("json") {
            set_once(meta, &mut self.json)
        } else if meta.path.is_ident("rename") {
            set_once(meta, &mut self.rename)
        } else if meta.path.is_ident("omitempty") {
            if self.omitempty {
                return Err(meta.error("duplicate `omitempty`"));
            }
            self.omitempty = true;
            Ok(())
        } else {
            Err(meta.error("unknown `project` attribute"))
        }
    }

    fn parse_serde(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if !meta.path.is_ident("rename") {
            return skip(meta);
        }

        if meta.input.peek(Token![=]) {
            self.serde_rename = Some(meta.value()?.parse::<LitStr>()?.value());
            return Ok(());
        }

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("serialize") {
                self.serde_rename =
                    Some(inner.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                skip(&inner)
            }
        })
    }

    /// The raw naming string recorded in the descriptor.
    fn naming(&self) -> Option<String> {
        if let Some(json) = &self.json {
            return Some(json.clone());
        }

        let name = self.rename.as_ref().or(self.serde_rename.as_ref());

        match (name, self.omitempty) {
            (None, false) => None,
            (Some(name), false) => Some(name.clone()),
            (name, true) => Some(format!(
                "{},omitempty",
                name.map_or("", String::as_str)
            )),
        }
    }
}

fn set_once(
    meta: &ParseNestedMeta,
    slot: &mut Option<String>,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate `project` attribute key"));
    }

    *slot = Some(meta.value()?.parse::<LitStr>()?.value());
    Ok(())
}

/// Consumes the argument of a `serde` key this macro does not interpret.
fn skip(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _content;
        syn::parenthesized!(_content in meta.input);
    }

    Ok(())
}

fn option_tokens(value: Option<&str>) -> proc_macro2::TokenStream {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}

/// Derive macro for `Project`.
///
/// Implements `tagview::Project` and `tagview::Field` for a struct. Each
/// field is classified at compile time: a field whose type implements
/// `tagview::Marshal` is handed over through that capability, every other
/// field through its `tagview::Field` implementation.
///
/// Type parameters receive a `tagview::Field` bound.
///
/// # Example
///
/// ```ignore
/// use tagview::Project;
///
/// #[derive(Project)]
/// struct Page<T> {
///     #[project(tags = "public")]
///     items: Vec<T>,
///     #[project(tags = "public", json = ",omitempty")]
///     next: Option<String>,
/// }
/// ```
///
/// ```compile_fail
/// # use tagview::Project;
/// #[derive(Project)]
/// union Bits {  // ❌ Unions cannot be projected
///     int: u32,
///     float: f32,
/// }
/// ```
#[proc_macro_derive(Project, attributes(project, project_crate, serde))]
pub fn derive_project(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let crate_path: syn::Path = if let Some(attr) = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("project_crate"))
    {
        match attr.parse_args::<syn::Path>() {
            Ok(path) => path,
            Err(_) => {
                return syn::Error::new_spanned(
                    attr,
                    "invalid `#[project_crate(...)]` attribute",
                )
                .to_compile_error()
                .into();
            }
        }
    } else {
        syn::parse_quote!(::tagview)
    };

    let mut marshal = false;
    for attr in
        input.attrs.iter().filter(|attr| attr.path().is_ident("project"))
    {
        if let Err(error) = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("marshal") {
                marshal = true;
                Ok(())
            } else {
                Err(meta.error("unknown `project` container attribute"))
            }
        }) {
            return error.to_compile_error().into();
        }
    }

    let fields = match &input.data {
        Data::Struct(data_struct) => &data_struct.fields,
        Data::Enum(_) => {
            return syn::Error::new_spanned(
                &input,
                "Project cannot be derived for enums; only structs have \
                 selectable fields",
            )
            .to_compile_error()
            .into();
        }
        Data::Union(_) => {
            return syn::Error::new_spanned(
                &input,
                "Project cannot be derived for unions",
            )
            .to_compile_error()
            .into();
        }
    };

    match impl_project(&crate_path, &input, fields, marshal) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => error.to_compile_error().into(),
    }
}

fn impl_project(
    crate_path: &syn::Path,
    input: &DeriveInput,
    fields: &Fields,
    marshal: bool,
) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    // Build where clause for Field bounds
    let mut where_clause =
        where_clause.cloned().unwrap_or_else(|| syn::parse_quote!(where));

    // Add Field bounds for all generic type parameters
    for param in &input.generics.params {
        if let syn::GenericParam::Type(type_param) = param {
            let ident = &type_param.ident;
            where_clause
                .predicates
                .push(syn::parse_quote!(#ident: #crate_path::Field));
        }
    }

    if marshal {
        where_clause
            .predicates
            .push(syn::parse_quote!(#name #ty_generics: #crate_path::Marshal));
    }

    let (is_struct, marshaled) = if marshal {
        (quote!(false), quote! {
            fn marshaled(&self) -> ::core::option::Option<&dyn #crate_path::Marshal> {
                ::core::option::Option::Some(self)
            }
        })
    } else {
        (quote!(true), quote!())
    };

    let mut descriptors = Vec::new();
    let mut accessors = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let attributes = FieldAttributes::parse(field)?;

        let (ident, member) = match &field.ident {
            Some(ident) => {
                (ident.unraw().to_string(), Member::Named(ident.clone()))
            }
            None => (index.to_string(), Member::Unnamed(Index::from(index))),
        };

        let selector = option_tokens(attributes.tags.as_deref());
        let naming = option_tokens(attributes.naming().as_deref());

        descriptors.push(quote! {
            #crate_path::FieldDescriptor::new(#ident, #selector, #naming)
        });
        accessors.push(quote! {
            #index => (&Probe(&self.#member)).probe()
        });
    }

    Ok(quote! {
        #[allow(clippy::trait_duplication_in_bounds)]
        impl #impl_generics #crate_path::Project for #name #ty_generics #where_clause {
            fn descriptor(&self) -> &'static #crate_path::Descriptor {
                const FIELDS: &[#crate_path::FieldDescriptor] = &[#(#descriptors),*];
                static DESCRIPTOR: #crate_path::Descriptor =
                    #crate_path::Descriptor::new(#name_str, FIELDS);

                &DESCRIPTOR
            }

            #[allow(unused_imports)]
            fn field(&self, index: usize) -> #crate_path::Node<'_> {
                use #crate_path::__internal::{Probe, ViaField as _, ViaMarshal as _};

                match index {
                    #(#accessors,)*
                    _ => #crate_path::Node::Nil,
                }
            }

            #marshaled
        }

        #[allow(clippy::trait_duplication_in_bounds)]
        impl #impl_generics #crate_path::Field for #name #ty_generics #where_clause {
            const STRUCT: bool = #is_struct;

            fn node(&self) -> #crate_path::Node<'_> {
                #crate_path::Node::Struct(self)
            }
        }
    })
}
