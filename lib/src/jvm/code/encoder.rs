use super::opcode;
use super::EncodedInstruction;
use crate::jvm::class_file::{
    ClassConstantIndex, Constant, ConstantPool, MethodRefConstantIndex, Serialize,
};
use crate::jvm::{Error, MethodDescriptor, RenderDescriptor};

#[derive(Debug)]
pub enum EncodeError {
    /// No `Methodref` (or `InterfaceMethodref`) for the member exists in the pool, so no
    /// instruction in the class can call it
    MemberNotFound {
        owner: String,
        name: String,
        descriptor: String,
    },

    /// Constant pool entries needed for the lookup are broken
    Malformed(Error),
}

impl From<Error> for EncodeError {
    fn from(err: Error) -> EncodeError {
        EncodeError::Malformed(err)
    }
}

/// Find every method reference for `owner.name` with the given signature, in pool order
///
/// Both `Methodref` and `InterfaceMethodref` entries qualify, the latter for static methods on
/// interfaces. A pool may hold several equivalent references, and instructions can use any of
/// them, so all are returned. The result is never empty.
pub fn find_method_refs(
    constants: &ConstantPool,
    owner: ClassConstantIndex,
    name: &str,
    descriptor: &MethodDescriptor,
) -> Result<Vec<MethodRefConstantIndex>, EncodeError> {
    let descriptor = descriptor.render();
    let mut found = vec![];
    for (index, constant) in constants.iter() {
        if let Constant::MethodRef {
            class,
            name_and_type,
            ..
        } = constant
        {
            if *class != owner {
                continue;
            }
            let (member_name, member_descriptor) = constants.name_and_type(*name_and_type)?;
            if member_name == name && member_descriptor == descriptor {
                found.push(MethodRefConstantIndex(index));
            }
        }
    }

    if found.is_empty() {
        return Err(EncodeError::MemberNotFound {
            owner: constants.class_name(owner)?,
            name: String::from(name),
            descriptor,
        });
    }
    if found.len() > 1 {
        let indices: Vec<String> = found
            .iter()
            .map(|index| format!("#{}", (index.0).0))
            .collect();
        log::warn!(
            "{} references to {}{} in the constant pool ({}), matching calls through any of them",
            found.len(),
            name,
            descriptor,
            indices.join(", ")
        );
    }
    Ok(found)
}

/// Encode the `invokestatic` instructions calling `owner.name` with the given signature
///
/// Each encoding is the `invokestatic` opcode followed by the big-endian index of a method
/// reference, one per equivalent reference (see [`find_method_refs`]). Nothing is added to the
/// constant pool: a member without a reference cannot be called from this class.
pub fn encode_static_invoke(
    constants: &ConstantPool,
    owner: ClassConstantIndex,
    name: &str,
    descriptor: &MethodDescriptor,
) -> Result<Vec<EncodedInstruction>, EncodeError> {
    let mut encoded = vec![];
    for method_ref in find_method_refs(constants, owner, name, descriptor)? {
        let mut bytes = vec![];
        opcode::INVOKESTATIC
            .serialize(&mut bytes)
            .and_then(|_| method_ref.serialize(&mut bytes))
            .map_err(Error::IoError)?;
        log::trace!("encoded invokestatic {}{:?} as {:02x?}", name, descriptor, bytes);
        encoded.push(EncodedInstruction::new(bytes));
    }
    Ok(encoded)
}
