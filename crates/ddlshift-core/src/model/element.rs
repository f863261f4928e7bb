use crate::model::{ColumnId, ConstraintId, DescId, IndexId};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ElementKind
///
/// Discriminator over the closed set of element variants.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum ElementKind {
    CheckConstraint,
    Column,
    SecondaryIndex,
    Sequence,
    Table,
    View,
}

impl ElementKind {
    pub const ALL: [Self; 6] = [
        Self::CheckConstraint,
        Self::Column,
        Self::SecondaryIndex,
        Self::Sequence,
        Self::Table,
        Self::View,
    ];
}

///
/// ElementSpec
///
/// Implemented by every element variant payload so rule sets can be typed
/// per kind while the registry stores them behind one erased signature.
///

pub trait ElementSpec: Sized + 'static {
    const KIND: ElementKind;

    /// Borrow the variant payload if `element` is of this kind.
    fn downcast(element: &Element) -> Option<&Self>;
}

///
/// Element
///
/// One schema object participating in a change. Produced by the planner and
/// never mutated by the transition engine.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Element {
    CheckConstraint(CheckConstraint),
    Column(Column),
    SecondaryIndex(SecondaryIndex),
    Sequence(Sequence),
    Table(Table),
    View(View),
}

impl Element {
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::CheckConstraint(_) => ElementKind::CheckConstraint,
            Self::Column(_) => ElementKind::Column,
            Self::SecondaryIndex(_) => ElementKind::SecondaryIndex,
            Self::Sequence(_) => ElementKind::Sequence,
            Self::Table(_) => ElementKind::Table,
            Self::View(_) => ElementKind::View,
        }
    }

    /// Descriptor the element belongs to.
    #[must_use]
    pub const fn descriptor_id(&self) -> DescId {
        match self {
            Self::CheckConstraint(c) => c.table_id,
            Self::Column(c) => c.table_id,
            Self::SecondaryIndex(i) => i.table_id,
            Self::Sequence(s) => s.sequence_id,
            Self::Table(t) => t.table_id,
            Self::View(v) => v.view_id,
        }
    }
}

// Wires a payload type to its Element variant.
macro_rules! element_variant {
    ($ty:ident) => {
        impl ElementSpec for $ty {
            const KIND: ElementKind = ElementKind::$ty;

            fn downcast(element: &Element) -> Option<&Self> {
                match element {
                    Element::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Element {
            fn from(inner: $ty) -> Self {
                Self::$ty(inner)
            }
        }
    };
}

///
/// Table
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Table {
    pub table_id: DescId,
}

element_variant!(Table);

///
/// View
///
/// A view plus the types and relations it references; dropping it must
/// remove the back-references those descriptors hold.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct View {
    pub view_id: DescId,
    pub uses_type_ids: Vec<DescId>,
    pub uses_relation_ids: Vec<DescId>,
}

element_variant!(View);

///
/// Sequence
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Sequence {
    pub sequence_id: DescId,
}

element_variant!(Sequence);

///
/// Column
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Column {
    pub table_id: DescId,
    pub column_id: ColumnId,
    pub name: String,
}

element_variant!(Column);

///
/// SecondaryIndex
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SecondaryIndex {
    pub table_id: DescId,
    pub index_id: IndexId,
    pub unique: bool,
}

element_variant!(SecondaryIndex);

///
/// CheckConstraint
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CheckConstraint {
    pub table_id: DescId,
    pub constraint_id: ConstraintId,
    pub column_ids: Vec<ColumnId>,
}

element_variant!(CheckConstraint);
