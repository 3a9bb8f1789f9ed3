use std::{
    any::{self, Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

use crate::sequence::BoxSeq;

/// A runtime descriptor for a concrete type.
///
/// Equality is by [`TypeId`]; the name is only for messages.
#[derive(Clone, Copy)]
pub struct TypeDesc {
    id: TypeId,
    name: &'static str,
}

impl TypeDesc {
    pub fn of<T: 'static>() -> Self {
        TypeDesc {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeDesc {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl fmt::Debug for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The shape a stage accepts or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// Any sequence. As an output it means "whatever came in".
    Any,
    /// A sequence of the described element type.
    Seq(TypeDesc),
    /// A value that is not a sequence at all.
    Opaque(TypeDesc),
}

impl Port {
    /// A sequence of `T`.
    pub fn seq_of<T: 'static>() -> Self {
        Port::Seq(TypeDesc::of::<T>())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Port::Any)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Any => f.write_str("any sequence"),
            Port::Seq(elem) => write!(f, "sequence of {elem}"),
            Port::Opaque(ty) => write!(f, "{ty}"),
        }
    }
}

/// A [`BoxSeq`] with its element type erased.
///
/// This is what flows between the stages of a [`Pipeline`](super::Pipeline).
pub struct ErasedSeq {
    elem: TypeDesc,
    seq: Box<dyn Any + Send>,
}

impl ErasedSeq {
    pub fn new<T: 'static>(seq: BoxSeq<T>) -> Self {
        ErasedSeq {
            elem: TypeDesc::of::<T>(),
            seq: Box::new(seq),
        }
    }

    /// Element type of the erased sequence.
    pub fn elem(&self) -> TypeDesc {
        self.elem
    }

    pub fn port(&self) -> Port {
        Port::Seq(self.elem)
    }

    /// Recover the typed sequence, or get `self` back if `T` is wrong.
    pub fn downcast<T: 'static>(self) -> Result<BoxSeq<T>, ErasedSeq> {
        let ErasedSeq { elem, seq } = self;
        match seq.downcast::<BoxSeq<T>>() {
            Ok(seq) => Ok(*seq),
            Err(seq) => Err(ErasedSeq { elem, seq }),
        }
    }
}

impl fmt::Debug for ErasedSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedSeq").field("elem", &self.elem).finish()
    }
}
