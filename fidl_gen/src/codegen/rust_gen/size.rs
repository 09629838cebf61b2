/* Wire layout facts: sizes, alignment, boxing and struct field offsets */

use super::context::Context;
use crate::error::GenError;
use fidl_types::{SimpleType, Type, TypeReference, UserDefinedType};
use serde_derive::Serialize;

/* Every encoded struct starts with num_bytes: u32 and version: u32 */
pub const STRUCT_HEADER_SIZE: u32 = 8;
/* Out-of-line data (strings, arrays, maps, structs) is referenced through a 64-bit offset */
pub const POINTER_SIZE: u32 = 8;
pub const HANDLE_SIZE: u32 = 4;
pub const ENUM_SIZE: u32 = 4;
pub const UNION_SIZE: u32 = 16;
pub const UNION_ALIGNMENT: u32 = 8;
/* Handle plus version */
pub const INTERFACE_SIZE: u32 = 8;
pub const INTERFACE_REQUEST_SIZE: u32 = 4;

const BITS_PER_BYTE: u8 = 8;

/// Round `size` up to the next multiple of `alignment`.
pub fn align_to(size: u32, alignment: u32) -> u32 {
    if alignment == 0 {
        return size;
    }
    let diff = size % alignment;
    if diff == 0 {
        size
    } else {
        size + alignment - diff
    }
}

/// Inline size of a field of type `ty` in the wire format.
pub fn wire_size(ty: &Type, ctx: &Context<'_>) -> Result<u32, GenError> {
    match ty {
        Type::Simple(simple) => simple_type_size(*simple),
        Type::String(_) | Type::Array(_) | Type::Map(_) => Ok(POINTER_SIZE),
        Type::Handle(_) => Ok(HANDLE_SIZE),
        Type::Reference(reference) => reference_size(reference, ctx),
    }
}

/// Inline alignment of a field of type `ty` in the wire format.
pub fn wire_alignment(ty: &Type, ctx: &Context<'_>) -> Result<u32, GenError> {
    if let Type::Reference(reference) = ty {
        if !reference.is_interface_request {
            if let UserDefinedType::Union(_) = ctx.resolve_type(&reference.type_key)? {
                return Ok(UNION_ALIGNMENT);
            }
        }
    }
    wire_size(ty, ctx)
}

pub fn simple_type_size(simple: SimpleType) -> Result<u32, GenError> {
    match simple {
        SimpleType::Bool => Err(GenError::BoolHasNoSize),
        SimpleType::Int8 | SimpleType::Uint8 => Ok(1),
        SimpleType::Int16 | SimpleType::Uint16 => Ok(2),
        SimpleType::Int32 | SimpleType::Uint32 | SimpleType::Float => Ok(4),
        SimpleType::Int64 | SimpleType::Uint64 | SimpleType::Double => Ok(8),
    }
}

fn reference_size(reference: &TypeReference, ctx: &Context<'_>) -> Result<u32, GenError> {
    if reference.is_interface_request {
        return Ok(INTERFACE_REQUEST_SIZE);
    }
    Ok(match ctx.resolve_type(&reference.type_key)? {
        UserDefinedType::Enum(_) => ENUM_SIZE,
        UserDefinedType::Struct(_) => POINTER_SIZE,
        UserDefinedType::Union(_) => UNION_SIZE,
        UserDefinedType::Interface(_) => INTERFACE_SIZE,
    })
}

/// Whether an optional value of this type must be heap allocated.
///
/// Structs and unions may refer back to themselves, so an inline `Option` of
/// one could have infinite size. This is a conservative approximation: every
/// struct and union is boxed, recursive or not.
pub fn needs_boxing(user_type: &UserDefinedType) -> bool {
    match user_type {
        UserDefinedType::Struct(_) | UserDefinedType::Union(_) => true,
        UserDefinedType::Enum(_) | UserDefinedType::Interface(_) => false,
    }
}

/// Placement of one field inside an encoded struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    /// Byte offset from the start of the struct, header included.
    pub offset: u32,
    /// Inline size in bytes; `None` for bools, which occupy a single bit.
    pub size: Option<u32>,
    /// Bit index within the byte at `offset`, for bools.
    pub bit: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructLayout {
    /// Total encoded size, header included, padded to 8 bytes.
    pub size: u32,
    /// One entry per field, in declaration order.
    pub fields: Vec<FieldLayout>,
}

/// Pack fields in declaration order, each into the first hole that fits at
/// its natural alignment. Consecutive bools share bytes bit by bit.
pub fn struct_layout<'t, I>(field_types: I, ctx: &Context<'_>) -> Result<StructLayout, GenError>
where
    I: IntoIterator<Item = &'t Type>,
{
    let mut occupied: Vec<(u32, u32)> = Vec::new();
    let mut bool_bytes: Vec<(u32, u8)> = Vec::new();
    let mut fields = Vec::new();

    for ty in field_types {
        if ty.is_bool() {
            let partial = bool_bytes
                .iter()
                .position(|(_, used)| *used < BITS_PER_BYTE);
            let (offset, bit) = match partial {
                Some(index) => {
                    let (offset, used) = &mut bool_bytes[index];
                    let bit = *used;
                    *used += 1;
                    (*offset, bit)
                }
                None => {
                    let offset = place(&mut occupied, 1, 1);
                    bool_bytes.push((offset, 1));
                    (offset, 0)
                }
            };
            fields.push(FieldLayout {
                offset: STRUCT_HEADER_SIZE + offset,
                size: None,
                bit: Some(bit),
            });
            continue;
        }

        let size = wire_size(ty, ctx)?;
        let alignment = wire_alignment(ty, ctx)?;
        let offset = place(&mut occupied, size, alignment);
        fields.push(FieldLayout {
            offset: STRUCT_HEADER_SIZE + offset,
            size: Some(size),
            bit: None,
        });
    }

    let payload_end = occupied.last().map(|(_, end)| *end).unwrap_or(0);
    Ok(StructLayout {
        size: STRUCT_HEADER_SIZE + align_to(payload_end, POINTER_SIZE),
        fields,
    })
}

/* First aligned offset where `size` bytes fit between the occupied ranges */
fn place(occupied: &mut Vec<(u32, u32)>, size: u32, alignment: u32) -> u32 {
    let mut candidate = 0;
    let mut index = occupied.len();
    for (i, &(start, end)) in occupied.iter().enumerate() {
        if candidate + size <= start {
            index = i;
            break;
        }
        candidate = candidate.max(align_to(end, alignment));
    }
    occupied.insert(index, (candidate, candidate + size));
    candidate
}
