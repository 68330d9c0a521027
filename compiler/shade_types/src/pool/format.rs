//! Type formatting for debugging and reflection output.

#![allow(clippy::format_push_string)] // Reflection output favours readable spelling over allocation

use shade_ir::StringLookup;

use crate::{Idx, Pool, ResourceShape, TypeKind};

impl Pool {
    /// Format a type the way it would be spelled in HLSL source.
    pub fn format_type(&self, idx: Idx, names: &impl StringLookup) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, names, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, idx: Idx, names: &impl StringLookup, buf: &mut String) {
        let Some(kind) = self.get(idx) else {
            buf.push_str("<none>");
            return;
        };

        match *kind {
            TypeKind::Scalar(scalar) => buf.push_str(scalar.name()),
            TypeKind::Vector { elem, count } => {
                self.format_type_into(elem, names, buf);
                buf.push_str(&count.to_string());
            }
            TypeKind::Matrix { elem, rows, cols } => {
                self.format_type_into(elem, names, buf);
                buf.push_str(&format!("{rows}x{cols}"));
            }
            TypeKind::Array { elem, len } => {
                self.format_type_into(elem, names, buf);
                match len {
                    Some(len) => buf.push_str(&format!("[{len}]")),
                    None => buf.push_str("[]"),
                }
            }
            TypeKind::Struct(id) => buf.push_str(names.lookup(self.struct_decl(id).name)),
            TypeKind::Alias { name, .. } => buf.push_str(names.lookup(name)),
            TypeKind::Resource { shape, access } => {
                let rw = if access.is_writable() { "RW" } else { "" };
                match shape {
                    ResourceShape::Texture { dim, elem } => {
                        buf.push_str(rw);
                        buf.push_str("Texture");
                        buf.push_str(dim.suffix());
                        self.format_generic_arg(elem, names, buf);
                    }
                    ResourceShape::TextureSampler { dim, .. } => {
                        buf.push_str("sampler");
                        buf.push_str(dim.suffix());
                    }
                    ResourceShape::Image { dim, .. } => {
                        buf.push_str("image");
                        buf.push_str(dim.suffix());
                    }
                    ResourceShape::SamplerState => buf.push_str("SamplerState"),
                    ResourceShape::SampledBuffer { elem } => {
                        buf.push_str(rw);
                        buf.push_str("Buffer");
                        self.format_generic_arg(elem, names, buf);
                    }
                    ResourceShape::RawBuffer => {
                        buf.push_str(rw);
                        buf.push_str("ByteAddressBuffer");
                    }
                    ResourceShape::InputAttachment => buf.push_str("subpassInput"),
                    ResourceShape::UntypedBuffer => buf.push_str("<untyped buffer>"),
                }
            }
            TypeKind::StructuredBuffer { kind, elem } => {
                buf.push_str(kind.name());
                self.format_generic_arg(elem, names, buf);
            }
            TypeKind::ParameterBlock { kind, elem } => {
                buf.push_str(kind.name());
                self.format_generic_arg(elem, names, buf);
            }
            TypeKind::Internal(marker) => buf.push_str(&format!("<{}>", marker.name())),
            TypeKind::Error => buf.push_str("<error>"),
        }
    }

    fn format_generic_arg(&self, arg: Idx, names: &impl StringLookup, buf: &mut String) {
        buf.push('<');
        self.format_type_into(arg, names, buf);
        buf.push('>');
    }
}
