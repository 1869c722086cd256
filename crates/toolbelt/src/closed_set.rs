//! Closed-set values: rich, fixed sets of named and valued instances.
//!
//! A plain `enum` cannot carry per-case data without a `match` in every
//! accessor, and it cannot be looked up by an external value or a display
//! string without hand-written tables. A *closed-set value* type instead
//! declares each member as an associated constant of an ordinary struct, and
//! lists those constants once in a static table. From that table the type gets:
//!
//! - lookup by value ([`ClosedSetValue::from_value`]) and by display name
//!   ([`ClosedSetValue::from_display_name`]), failing with
//!   [`ToolbeltError::NotFound`] instead of returning a default;
//! - enumeration in declaration order ([`ClosedSetValue::all_members`]);
//! - equality, ordering and hashing by value alone;
//! - `Display` as the display name and serde support as the value.
//!
//! Every concrete type is its own *taxonomy*: members of two taxonomies cannot
//! be compared, even if they share a value type, because `PartialEq` and `Ord`
//! are only implemented against `Self`.
//!
//! ## Declaring a taxonomy
//!
//! ```
//! use toolbelt::{closed_set, ClosedSetValue, Member};
//!
//! #[derive(Debug, Clone)]
//! pub struct Priority {
//!     member: Member<u8>,
//!     sla_hours: u32,
//! }
//!
//! impl Priority {
//!     pub const LOW: Self = Self { member: Member::declare(1, "Low"), sla_hours: 72 };
//!     pub const HIGH: Self = Self { member: Member::declare(2, "High"), sla_hours: 4 };
//!
//!     pub fn sla_hours(&self) -> u32 {
//!         self.sla_hours
//!     }
//! }
//!
//! closed_set! {
//!     impl Priority: u8 as member { LOW, HIGH }
//! }
//!
//! assert_eq!(Priority::from_value(&2).unwrap(), &Priority::HIGH);
//! assert_eq!(Priority::from_display_name("Low").unwrap().sla_hours(), 72);
//! assert!(Priority::LOW < Priority::HIGH);
//! ```
//!
//! Keep the struct fields private: only the declaring module may create
//! members, so the declared table stays the complete set.
//!
//! ## Validation
//!
//! The declared table is indexed on first access, at most once per process,
//! behind a [`OnceLock`]. Indexing rejects blank display names
//! ([`ToolbeltError::InvalidArgument`]) and repeated values or display names
//! ([`ToolbeltError::Duplicate`]). A table that fails validation makes every
//! lookup on that taxonomy return the same error.

use std::fmt;
use std::hash::Hash;
use std::sync::OnceLock;

use crate::collections::UniqueValueSet;
use crate::errors::{Result, ToolbeltError};
use crate::guard;

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// The value and display name shared by every closed-set member.
///
/// Concrete taxonomy types embed one `Member` alongside their own attributes.
#[derive(Debug, Clone, Copy)]
pub struct Member<V> {
    value: V,
    display_name: &'static str,
}

impl<V> Member<V> {
    /// Declares a member in a `const` context.
    ///
    /// The display name is checked when the owning taxonomy is first indexed.
    pub const fn declare(value: V, display_name: &'static str) -> Self {
        Self {
            value,
            display_name,
        }
    }

    /// Creates a member, failing with [`ToolbeltError::InvalidArgument`] if
    /// `display_name` is empty or whitespace.
    pub fn new(value: V, display_name: &'static str) -> Result<Self> {
        guard::not_blank(display_name, "display_name")?;
        Ok(Self::declare(value, display_name))
    }

    /// The member's unique value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The member's unique, human-readable name.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }
}

// ---------------------------------------------------------------------------
// ClosedSetValue
// ---------------------------------------------------------------------------

/// A type whose instances form a fixed, declared-in-advance set.
///
/// Implement through [`closed_set!`](crate::closed_set), which also provides
/// `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`, `Display`, `Serialize` and
/// `Deserialize` consistent with the value-based identity below.
pub trait ClosedSetValue: Clone + fmt::Debug + Send + Sync + Sized + 'static {
    /// The ordered value that identifies a member.
    type Value: Ord + Hash + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Name of the taxonomy, used in diagnostics.
    const NAME: &'static str;

    /// Every member, in declaration order.
    const MEMBERS: &'static [Self];

    /// The shared value/display-name core of this member.
    fn member(&self) -> &Member<Self::Value>;

    /// The process-wide index cell for this taxonomy.
    fn taxonomy_cell() -> &'static TaxonomyCell<Self>;

    /// The member's unique value.
    fn value(&self) -> &Self::Value {
        self.member().value()
    }

    /// The member's unique, human-readable name.
    fn display_name(&self) -> &'static str {
        self.member().display_name()
    }

    /// The validated index of this taxonomy, built on first call.
    fn taxonomy() -> Result<&'static Taxonomy<Self>> {
        Self::taxonomy_cell().get()
    }

    /// Iterates every declared member in declaration order.
    ///
    /// Each call returns a fresh iterator.
    fn all_members() -> Result<Members<Self>> {
        Ok(Self::taxonomy()?.iter())
    }

    /// Returns the member whose value equals `value`.
    fn from_value(value: &Self::Value) -> Result<&'static Self> {
        Self::taxonomy()?.by_value(value)
    }

    /// Returns the member whose display name is exactly `display_name`.
    ///
    /// The comparison is case-sensitive.
    fn from_display_name(display_name: &str) -> Result<&'static Self> {
        Self::taxonomy()?.by_display_name(display_name)
    }
}

/// Iterator over the members of a taxonomy.
pub type Members<S> = std::slice::Iter<'static, S>;

// ---------------------------------------------------------------------------
// Taxonomy index
// ---------------------------------------------------------------------------

/// Validated lookup index over a taxonomy's declared members.
#[derive(Debug)]
pub struct Taxonomy<S: ClosedSetValue> {
    members: &'static [S],
    index: UniqueValueSet<S::Value, &'static str>,
}

impl<S: ClosedSetValue> Taxonomy<S> {
    /// Validates `members` and builds the value and display-name index.
    pub fn index(members: &'static [S]) -> Result<Self> {
        let mut index: UniqueValueSet<S::Value, &'static str> =
            UniqueValueSet::labelled(S::NAME, "value", "display name");

        for member in members {
            let value = member.value();
            let display_name = member.display_name();

            guard::not_blank(display_name, &format!("{}({value}).display_name", S::NAME))?;
            index.insert(value.clone(), display_name)?;
        }

        tracing::debug!(
            taxonomy = S::NAME,
            members = members.len(),
            "Indexed closed-set taxonomy"
        );

        Ok(Self { members, index })
    }

    /// Iterates the members in declaration order.
    pub fn iter(&self) -> Members<S> {
        self.members.iter()
    }

    /// Number of declared members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the taxonomy declares no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the member whose value equals `value`.
    pub fn by_value(&self, value: &S::Value) -> Result<&'static S> {
        match self.index.position_of_key(value) {
            Some(position) => Ok(&self.members[position]),
            None => {
                tracing::debug!(taxonomy = S::NAME, value = %value, "No member with value");
                Err(ToolbeltError::not_found(S::NAME, "value", value))
            }
        }
    }

    /// Returns the member whose display name is exactly `display_name`.
    pub fn by_display_name(&self, display_name: &str) -> Result<&'static S> {
        match self.index.position_of_value(display_name) {
            Some(position) => Ok(&self.members[position]),
            None => {
                tracing::debug!(
                    taxonomy = S::NAME,
                    display_name,
                    "No member with display name"
                );
                Err(ToolbeltError::not_found(S::NAME, "display name", display_name))
            }
        }
    }
}

/// One-time initialisation cell holding a taxonomy's index.
///
/// [`closed_set!`](crate::closed_set) places one of these in a `static` per
/// taxonomy. Concurrent first accesses index the table exactly once.
#[derive(Debug)]
pub struct TaxonomyCell<S: ClosedSetValue> {
    cell: OnceLock<Result<Taxonomy<S>>>,
}

impl<S: ClosedSetValue> TaxonomyCell<S> {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the index, building it from [`ClosedSetValue::MEMBERS`] on first use.
    pub fn get(&'static self) -> Result<&'static Taxonomy<S>> {
        self.cell
            .get_or_init(|| Taxonomy::index(S::MEMBERS))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl<S: ClosedSetValue> Default for TaxonomyCell<S> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Declaration macro
// ---------------------------------------------------------------------------

/// Implements [`ClosedSetValue`] and the value-based trait family for a struct.
///
/// ```text
/// closed_set! {
///     impl <Type>: <ValueType> as <member_field> { <CONST>, <CONST>, ... }
/// }
/// ```
///
/// `<member_field>` is the struct field holding the [`Member`]; the constants
/// are listed in declaration order. `<ValueType>` must be an owned type that
/// implements `serde::Deserialize` for any lifetime (integers, `char`, ...).
#[macro_export]
macro_rules! closed_set {
    (
        impl $ty:ident : $value:ty as $field:ident {
            $($member:ident),+ $(,)?
        }
    ) => {
        impl $crate::ClosedSetValue for $ty {
            type Value = $value;

            const NAME: &'static str = ::core::stringify!($ty);

            const MEMBERS: &'static [Self] = &[$(Self::$member),+];

            fn member(&self) -> &$crate::Member<$value> {
                &self.$field
            }

            fn taxonomy_cell() -> &'static $crate::TaxonomyCell<Self> {
                static CELL: $crate::TaxonomyCell<$ty> = $crate::TaxonomyCell::new();
                &CELL
            }
        }

        impl ::core::cmp::PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::ClosedSetValue::value(self) == $crate::ClosedSetValue::value(other)
            }
        }

        impl ::core::cmp::Eq for $ty {}

        impl ::core::cmp::PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                ::core::option::Option::Some(::core::cmp::Ord::cmp(self, other))
            }
        }

        impl ::core::cmp::Ord for $ty {
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                ::core::cmp::Ord::cmp(
                    $crate::ClosedSetValue::value(self),
                    $crate::ClosedSetValue::value(other),
                )
            }
        }

        impl ::core::hash::Hash for $ty {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash($crate::ClosedSetValue::value(self), state);
            }
        }

        impl ::core::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::ClosedSetValue::display_name(self))
            }
        }

        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<Ser>(&self, serializer: Ser) -> ::core::result::Result<Ser::Ok, Ser::Error>
            where
                Ser: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(
                    $crate::ClosedSetValue::value(self),
                    serializer,
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<De>(deserializer: De) -> ::core::result::Result<Self, De::Error>
            where
                De: $crate::__private::serde::Deserializer<'de>,
            {
                let value =
                    <$value as $crate::__private::serde::Deserialize<'de>>::deserialize(deserializer)?;
                <Self as $crate::ClosedSetValue>::from_value(&value)
                    .map(::core::clone::Clone::clone)
                    .map_err(<De::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::Barrier;

    use super::*;

    #[derive(Debug, Clone)]
    struct Colour {
        member: Member<u8>,
    }

    impl Colour {
        const RED: Self = Self {
            member: Member::declare(1, "Red"),
        };
        const GREEN: Self = Self {
            member: Member::declare(2, "Green"),
        };
        const BLUE: Self = Self {
            member: Member::declare(3, "Blue"),
        };
    }

    crate::closed_set! {
        impl Colour: u8 as member { RED, GREEN, BLUE }
    }

    // Same value type as `Colour`, disjoint taxonomy.
    #[derive(Debug, Clone)]
    struct Shape {
        member: Member<u8>,
        sides: u8,
    }

    impl Shape {
        const TRIANGLE: Self = Self {
            member: Member::declare(3, "Triangle"),
            sides: 3,
        };
        const SQUARE: Self = Self {
            member: Member::declare(4, "Square"),
            sides: 4,
        };
    }

    crate::closed_set! {
        impl Shape: u8 as member { SQUARE, TRIANGLE }
    }

    #[derive(Debug, Clone)]
    struct RepeatedValue {
        member: Member<i32>,
    }

    impl RepeatedValue {
        const FIRST: Self = Self {
            member: Member::declare(1, "First"),
        };
        const SECOND: Self = Self {
            member: Member::declare(1, "Second"),
        };
    }

    crate::closed_set! {
        impl RepeatedValue: i32 as member { FIRST, SECOND }
    }

    #[derive(Debug, Clone)]
    struct RepeatedName {
        member: Member<i32>,
    }

    impl RepeatedName {
        const FIRST: Self = Self {
            member: Member::declare(1, "Same"),
        };
        const SECOND: Self = Self {
            member: Member::declare(2, "Same"),
        };
    }

    crate::closed_set! {
        impl RepeatedName: i32 as member { FIRST, SECOND }
    }

    #[derive(Debug, Clone)]
    struct BlankName {
        member: Member<u8>,
    }

    impl BlankName {
        const ONLY: Self = Self {
            member: Member::declare(1, "  "),
        };
    }

    crate::closed_set! {
        impl BlankName: u8 as member { ONLY }
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn member_new_rejects_blank_display_names() {
        for name in ["", " ", "\t\n"] {
            assert!(matches!(
                Member::new(1, name),
                Err(ToolbeltError::InvalidArgument { .. })
            ));
        }
        let member = Member::new(7, "Seven").unwrap();
        assert_eq!(member.value(), &7);
        assert_eq!(member.display_name(), "Seven");
    }

    #[test]
    fn all_members_follows_declaration_order() {
        let colours: Vec<_> = Colour::all_members().unwrap().cloned().collect();
        assert_eq!(colours, vec![Colour::RED, Colour::GREEN, Colour::BLUE]);

        // Declared out of value order on purpose.
        let shapes: Vec<_> = Shape::all_members()
            .unwrap()
            .map(|s| s.display_name())
            .collect();
        assert_eq!(shapes, vec!["Square", "Triangle"]);
    }

    #[test]
    fn all_members_is_restartable() {
        let first = Colour::all_members().unwrap().count();
        let second = Colour::all_members().unwrap().count();
        assert_eq!(first, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn all_members_excludes_other_taxonomies_with_the_same_value_type() {
        // Value 3 exists in both taxonomies.
        assert_eq!(Colour::from_value(&3).unwrap().display_name(), "Blue");
        assert_eq!(Shape::from_value(&3).unwrap().display_name(), "Triangle");
        assert!(Shape::all_members()
            .unwrap()
            .all(|s| s.display_name() != "Blue"));
    }

    #[test]
    fn from_value_finds_the_unique_member() {
        assert_eq!(Colour::from_value(&2).unwrap(), &Colour::GREEN);
        assert_eq!(Shape::from_value(&4).unwrap().sides, 4);
    }

    #[test]
    fn from_value_fails_for_undeclared_values() {
        let err = Colour::from_value(&99).unwrap_err();
        assert_eq!(
            err,
            ToolbeltError::NotFound {
                container: "Colour".into(),
                lookup: "value".into(),
                key: "99".into(),
            }
        );
    }

    #[test]
    fn from_display_name_is_exact_and_case_sensitive() {
        assert_eq!(Colour::from_display_name("Red").unwrap(), &Colour::RED);
        assert!(matches!(
            Colour::from_display_name("red"),
            Err(ToolbeltError::NotFound { .. })
        ));
        assert!(Colour::from_display_name("Red ").is_err());
    }

    #[test]
    fn both_lookup_paths_agree() {
        for colour in Colour::all_members().unwrap() {
            let by_value = Colour::from_value(colour.value()).unwrap();
            let by_name = Colour::from_display_name(colour.display_name()).unwrap();
            assert!(std::ptr::eq(by_value, by_name));
        }
    }

    #[test]
    fn equality_and_hash_depend_on_value_only() {
        let copy = Colour {
            member: Member::declare(1, "Crimson"),
        };
        assert_eq!(copy, Colour::RED);
        assert_eq!(hash_of(&copy), hash_of(&Colour::RED));
        assert_ne!(Colour::RED, Colour::GREEN);
    }

    #[test]
    fn ordering_follows_value() {
        let mut shuffled = vec![Colour::BLUE, Colour::RED, Colour::GREEN];
        shuffled.sort();
        assert_eq!(shuffled, vec![Colour::RED, Colour::GREEN, Colour::BLUE]);
        assert!(Shape::TRIANGLE < Shape::SQUARE);
    }

    #[test]
    fn display_uses_the_display_name() {
        assert_eq!(Colour::GREEN.to_string(), "Green");
    }

    #[test]
    fn repeated_values_are_rejected_on_first_access() {
        let err = RepeatedValue::from_value(&1).unwrap_err();
        assert!(matches!(
            err,
            ToolbeltError::Duplicate { ref lookup, ref key, .. } if lookup == "value" && key == "1"
        ));
        // The failure is sticky.
        assert!(RepeatedValue::all_members().is_err());
    }

    #[test]
    fn repeated_display_names_are_rejected() {
        assert!(matches!(
            RepeatedName::from_display_name("Same"),
            Err(ToolbeltError::Duplicate { ref lookup, .. }) if lookup == "display name"
        ));
    }

    #[test]
    fn blank_declared_display_names_are_rejected() {
        assert!(matches!(
            BlankName::all_members(),
            Err(ToolbeltError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn members_serialise_as_their_value() {
        let json = serde_json::to_string(&vec![Colour::RED, Colour::BLUE]).unwrap();
        assert_eq!(json, "[1,3]");

        let back: Colour = serde_json::from_str("2").unwrap();
        assert_eq!(back, Colour::GREEN);
        assert_eq!(back.display_name(), "Green");

        let unknown = serde_json::from_str::<Colour>("42").unwrap_err();
        assert!(unknown.to_string().contains("42 is not a valid value for Colour"));
    }

    // Only `concurrent_first_access_sees_one_index` touches this taxonomy.
    #[derive(Debug, Clone)]
    struct Direction {
        member: Member<char>,
    }

    impl Direction {
        const NORTH: Self = Self {
            member: Member::declare('N', "North"),
        };
        const EAST: Self = Self {
            member: Member::declare('E', "East"),
        };
        const SOUTH: Self = Self {
            member: Member::declare('S', "South"),
        };
        const WEST: Self = Self {
            member: Member::declare('W', "West"),
        };
    }

    crate::closed_set! {
        impl Direction: char as member { NORTH, EAST, SOUTH, WEST }
    }

    #[test]
    fn concurrent_first_access_sees_one_index() {
        const THREADS: usize = 8;
        let start = Barrier::new(THREADS);

        let indexes: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        start.wait();
                        Direction::taxonomy().unwrap() as *const Taxonomy<Direction> as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(indexes.len(), THREADS);
        assert!(indexes.windows(2).all(|w| w[0] == w[1]));
        let taxonomy = Direction::taxonomy().unwrap();
        assert_eq!(taxonomy as *const Taxonomy<Direction> as usize, indexes[0]);
        assert_eq!(taxonomy.len(), 4);
        assert_eq!(Direction::from_display_name("South").unwrap(), &Direction::SOUTH);
    }

    #[test]
    fn defined_guard_reports_a_broken_taxonomy_unchanged() {
        assert!(matches!(
            guard::defined::<RepeatedValue>(&1, "kind"),
            Err(ToolbeltError::Duplicate { ref container, ref lookup, .. })
                if container == "RepeatedValue" && lookup == "value"
        ));
        assert!(matches!(
            guard::defined::<BlankName>(&1, "kind"),
            Err(ToolbeltError::InvalidArgument { ref argument, .. }) if argument != "kind"
        ));
    }

    #[test]
    fn defined_guard_accepts_only_declared_values() {
        assert_eq!(guard::defined::<Colour>(&1, "colour").unwrap(), &Colour::RED);
        assert!(matches!(
            guard::defined::<Colour>(&0, "colour"),
            Err(ToolbeltError::InvalidArgument { ref argument, .. }) if argument == "colour"
        ));
    }
}
