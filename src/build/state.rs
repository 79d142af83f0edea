//! Builder typestates.

/// Start of URI.
pub struct UriStart(());
/// Start of relative reference.
pub struct RelativeStart(());
/// Start of URI reference.
pub struct RefStart(());
/// End of scheme.
pub struct SchemeEnd(());
/// End of authority.
pub struct AuthorityEnd(());
/// End of path.
pub struct PathEnd(());
/// End of query.
pub struct QueryEnd(());
/// End of fragment
pub struct FragmentEnd(());
/// End of URI reference.
pub struct End(());

/// Indicates the next possible state.
pub trait To<T> {}

/// Indicates that we may advance to this state, skipping optional components.
pub trait AdvanceTo<T> {}

macro_rules! impl_to {
    ($x:ty => $($y:ty),*) => {
        $(
            impl To<$y> for $x {}
        )*
    };
}

macro_rules! impl_advance_to {
    ($x:ty => $($y:ty),*) => {
        $(
            impl AdvanceTo<$y> for $x {}
        )*
    };
}

impl_to!(UriStart => SchemeEnd);
impl_to!(RelativeStart => AuthorityEnd, PathEnd);
impl_to!(RefStart => SchemeEnd, AuthorityEnd, PathEnd);
impl_to!(SchemeEnd => AuthorityEnd, PathEnd);
impl_to!(AuthorityEnd => PathEnd);
impl_to!(PathEnd => QueryEnd, FragmentEnd, End);
impl_to!(QueryEnd => FragmentEnd, End);
impl_to!(FragmentEnd => End);

// The scheme of a URI and the path are never skipped.
impl_advance_to!(RelativeStart => AuthorityEnd);
impl_advance_to!(RefStart => SchemeEnd, AuthorityEnd);
impl_advance_to!(SchemeEnd => AuthorityEnd);
impl_advance_to!(PathEnd => QueryEnd, FragmentEnd);
impl_advance_to!(QueryEnd => FragmentEnd);
