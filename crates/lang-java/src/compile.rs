//! Canonical rendering of [`TypeRef`]s.
//!
//! The context-free form is parseable back into the same structure, array levels
//! included. The context form renders names as seen from a usage site and serves as
//! the dictionary key.

use crate::naming::JavaNaming;
use rosetta_api::{NameShortener, TypeRef};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const JAVA_LANG: &str = "java.lang";

/// Where a type is rendered: the class using it and the class declaring it.
#[derive(Clone, Copy)]
pub struct TypeContext<'a> {
    pub usage: &'a str,
    pub declaring: &'a str,
    shortener: &'a dyn NameShortener,
}

impl<'a> TypeContext<'a> {
    pub fn new(usage: &'a str, declaring: &'a str, shortener: &'a dyn NameShortener) -> Self {
        Self {
            usage,
            declaring,
            shortener,
        }
    }

    pub fn shorten(&self, full_name: &str) -> String {
        self.shortener.shorten(self.usage, self.declaring, full_name)
    }
}

pub fn compile(ty: &TypeRef) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, &|name| name.to_string());
    out
}

pub fn compile_in(ty: &TypeRef, ctx: &TypeContext<'_>) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, &|name| ctx.shorten(name));
    out
}

fn write_type(out: &mut String, ty: &TypeRef, names: &dyn Fn(&str) -> String) {
    // Type variables, wildcards and primitives have no qualified form.
    if ty.is_generic() || ty.is_primitive() {
        out.push_str(ty.base());
    } else {
        out.push_str(&names(ty.base()));
    }

    match ty {
        TypeRef::Simple(simple) => {
            if let Some(sub_types) = simple.sub_types() {
                out.push('<');
                for (i, sub) in sub_types.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(out, sub, names);
                }
                out.push('>');
            }
        }
        TypeRef::Bounded(bounded) => {
            out.push(' ');
            out.push_str(bounded.bound_kind().keyword());
            out.push(' ');
            for (i, bound) in bounded.bounds().iter().enumerate() {
                if i > 0 {
                    out.push_str(" & ");
                }
                write_type(out, bound, names);
            }
        }
    }

    for _ in 0..ty.array_depth() {
        out.push_str("[]");
    }
}

/// Built-in name rendering policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShorteningPolicy {
    /// Always render fully qualified names.
    #[default]
    Qualified,
    /// Drop the package when it is `java.lang` or the package of the usage site.
    PackageRelative,
}

impl NameShortener for ShorteningPolicy {
    fn shorten(&self, usage: &str, _declaring: &str, full_name: &str) -> String {
        match self {
            ShorteningPolicy::Qualified => full_name.to_string(),
            ShorteningPolicy::PackageRelative => {
                let package = JavaNaming::package_of(full_name);
                if !package.is_empty()
                    && (package == JAVA_LANG || package == JavaNaming::package_of(usage))
                {
                    JavaNaming::relative_name(full_name).to_string()
                } else {
                    full_name.to_string()
                }
            }
        }
    }
}

impl FromStr for ShorteningPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qualified" => Ok(ShorteningPolicy::Qualified),
            "package_relative" | "package-relative" => Ok(ShorteningPolicy::PackageRelative),
            _ => Err(format!("Unknown shortening policy: {}", s)),
        }
    }
}
