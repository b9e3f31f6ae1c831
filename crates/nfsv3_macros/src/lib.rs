#![doc = include_str!("../README.md")]

extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Expr, Fields, Ident, Index, Lit, Meta, Variant,
    parse_macro_input,
};

/// Parses the discriminant of a union arm given as `#[xdr(value)]`.
fn parse_xdr_value(attrs: &[Attribute]) -> Option<u32> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("xdr"))
        .find_map(|attr| {
            let Meta::List(meta_list) = &attr.meta else {
                return None;
            };
            match meta_list.parse_args::<Expr>() {
                Ok(Expr::Lit(syn::ExprLit {
                    lit: Lit::Int(lit_int),
                    ..
                })) => lit_int.base10_parse::<u32>().ok(),
                _ => None,
            }
        })
}

/// A field accessor plus the local binding used while unpacking it.
struct FieldAccess {
    member: TokenStream2,
    binding: Ident,
}

fn field_accesses(fields: &Fields) -> Vec<FieldAccess> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|f| f.ident.clone())
            .map(|ident| FieldAccess {
                member: quote! { #ident },
                binding: ident,
            })
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(|i| {
                let index = Index::from(i);
                FieldAccess {
                    member: quote! { #index },
                    binding: Ident::new(&format!("field_{i}"), proc_macro2::Span::call_site()),
                }
            })
            .collect(),
        Fields::Unit => Vec::new(),
    }
}

/// Struct fields are packed and unpacked in declaration order, nothing else is emitted.
fn generate_struct_impl(name: &Ident, generics: &syn::Generics, fields: &Fields) -> TokenStream2 {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let accesses = field_accesses(fields);

    let packed_size_fields = accesses.iter().map(|FieldAccess { member, .. }| {
        quote! {
            total_size += ::nfsv3_types::xdr_codec::Pack::packed_size(&self.#member);
        }
    });
    let pack_fields = accesses.iter().map(|FieldAccess { member, .. }| {
        quote! {
            total_write += ::nfsv3_types::xdr_codec::Pack::pack(&self.#member, out)?;
        }
    });
    let unpack_fields = accesses.iter().map(|FieldAccess { binding, .. }| {
        quote! {
            let (#binding, read_bytes) = ::nfsv3_types::xdr_codec::Unpack::unpack(input)?;
            total_read += read_bytes;
        }
    });
    let bindings = accesses.iter().map(|FieldAccess { binding, .. }| binding);
    let construct = match fields {
        Fields::Named(_) => quote! { Self { #(#bindings),* } },
        Fields::Unnamed(_) => quote! { Self( #(#bindings),* ) },
        Fields::Unit => quote! { Self },
    };

    quote! {
        impl #impl_generics ::nfsv3_types::xdr_codec::Pack for #name #ty_generics
        #where_clause {
            fn packed_size(&self) -> usize {
                #[allow(unused_mut)]
                let mut total_size = 0;
                #(#packed_size_fields)*
                total_size
            }

            fn pack(&self, out: &mut impl ::std::io::Write) -> ::nfsv3_types::xdr_codec::Result<usize> {
                #[allow(unused_mut)]
                let mut total_write = 0;
                #(#pack_fields)*
                let _ = out;
                Ok(total_write)
            }
        }

        impl #impl_generics ::nfsv3_types::xdr_codec::Unpack for #name #ty_generics
        #where_clause {
            fn unpack(input: &mut impl ::std::io::Read) -> ::nfsv3_types::xdr_codec::Result<(Self, usize)> {
                #[allow(unused_mut)]
                let mut total_read = 0;
                #(#unpack_fields)*
                let _ = input;
                Ok((#construct, total_read))
            }
        }
    }
}

fn validate_union_arm(variant: &Variant) -> Result<u32, String> {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Unit => {}
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {}
        _ => {
            return Err(format!(
                "union arm '{ident}' must be either unit or have exactly one unnamed field"
            ));
        }
    }
    parse_xdr_value(&variant.attrs)
        .ok_or_else(|| format!("union arm '{ident}' must have #[xdr(value)] attribute"))
}

/// Discriminated union: the `#[xdr(n)]` tag word followed by the arm body, if any.
fn generate_union_impl(name: &Ident, generics: &syn::Generics, data: &DataEnum) -> TokenStream2 {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let arms = data
        .variants
        .iter()
        .map(|variant| {
            validate_union_arm(variant).unwrap_or_else(|err| panic!("{err}"));
            variant
        })
        .collect::<Vec<_>>();

    let packed_size_arms = arms.iter().map(|variant| {
        let ident = &variant.ident;
        if matches!(variant.fields, Fields::Unit) {
            quote! { Self::#ident => 4, }
        } else {
            quote! { Self::#ident(val) => 4 + ::nfsv3_types::xdr_codec::Pack::packed_size(val), }
        }
    });

    let pack_arms = arms.iter().map(|variant| {
        let ident = &variant.ident;
        let tag = parse_xdr_value(&variant.attrs).unwrap_or_default();
        if matches!(variant.fields, Fields::Unit) {
            quote! { Self::#ident => ::nfsv3_types::xdr_codec::Pack::pack(&#tag, out), }
        } else {
            quote! {
                Self::#ident(val) => {
                    let len = ::nfsv3_types::xdr_codec::Pack::pack(&#tag, out)?;
                    Ok(len + ::nfsv3_types::xdr_codec::Pack::pack(val, out)?)
                }
            }
        }
    });

    let unpack_arms = arms.iter().map(|variant| {
        let ident = &variant.ident;
        let tag = parse_xdr_value(&variant.attrs).unwrap_or_default();
        if matches!(variant.fields, Fields::Unit) {
            quote! { #tag => Ok((Self::#ident, tag_len)), }
        } else {
            quote! {
                #tag => {
                    let (val, val_len) = ::nfsv3_types::xdr_codec::Unpack::unpack(input)?;
                    Ok((Self::#ident(val), tag_len + val_len))
                }
            }
        }
    });

    quote! {
        impl #impl_generics ::nfsv3_types::xdr_codec::Pack for #name #ty_generics
        #where_clause {
            fn packed_size(&self) -> usize {
                match self {
                    #(#packed_size_arms)*
                }
            }

            fn pack(&self, out: &mut impl ::std::io::Write) -> ::nfsv3_types::xdr_codec::Result<usize> {
                match self {
                    #(#pack_arms)*
                }
            }
        }

        impl #impl_generics ::nfsv3_types::xdr_codec::Unpack for #name #ty_generics
        #where_clause {
            fn unpack(input: &mut impl ::std::io::Read) -> ::nfsv3_types::xdr_codec::Result<(Self, usize)> {
                let (tag, tag_len) = <u32 as ::nfsv3_types::xdr_codec::Unpack>::unpack(input)?;
                match tag {
                    #(#unpack_arms)*
                    _ => Err(::nfsv3_types::xdr_codec::Error::InvalidEnumValue(tag)),
                }
            }
        }
    }
}

/// C-like enum: the discriminant as one word. The enum must be `Copy`.
fn generate_enum_impl(name: &Ident, generics: &syn::Generics, data: &DataEnum) -> TokenStream2 {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let unpack_variants = data.variants.iter().map(|v| {
        let ident = &v.ident;
        quote! {
            x if x == Self::#ident as u32 => Ok((Self::#ident, tag_len)),
        }
    });

    quote! {
        impl #impl_generics ::nfsv3_types::xdr_codec::Pack for #name #ty_generics
        #where_clause {
            fn packed_size(&self) -> usize {
                4
            }

            fn pack(&self, out: &mut impl ::std::io::Write) -> ::nfsv3_types::xdr_codec::Result<usize> {
                ::nfsv3_types::xdr_codec::Pack::pack(&(*self as u32), out)
            }
        }

        impl #impl_generics ::nfsv3_types::xdr_codec::Unpack for #name #ty_generics
        #where_clause {
            fn unpack(input: &mut impl ::std::io::Read) -> ::nfsv3_types::xdr_codec::Result<(Self, usize)> {
                let (tag, tag_len) = <u32 as ::nfsv3_types::xdr_codec::Unpack>::unpack(input)?;
                match tag {
                    #(#unpack_variants)*
                    _ => Err(::nfsv3_types::xdr_codec::Error::InvalidEnumValue(tag)),
                }
            }
        }
    }
}

/// Derives `Pack` and `Unpack` for structs, C-like enums and `#[xdr(n)]` discriminated unions.
///
/// Every field type must itself implement `Pack`/`Unpack`; anything outside the XDR rule table
/// is rejected at compile time.
#[proc_macro_derive(XdrCodec, attributes(xdr))]
#[allow(clippy::missing_panics_doc)]
pub fn derive_xdr_codec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = &input.generics;

    let result = match &input.data {
        Data::Struct(data_struct) => generate_struct_impl(name, generics, &data_struct.fields),
        Data::Enum(data_enum) => {
            let is_union = data_enum
                .variants
                .iter()
                .any(|v| !matches!(v.fields, Fields::Unit) || parse_xdr_value(&v.attrs).is_some());
            if is_union {
                generate_union_impl(name, generics, data_enum)
            } else {
                generate_enum_impl(name, generics, data_enum)
            }
        }
        Data::Union(_) => panic!("XdrCodec can only be derived for structs and enums"),
    };

    result.into()
}
