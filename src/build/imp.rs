use crate::{
    component::{Authority, Fragment, Query, Repr, Scheme},
    error::Result,
    path::{Part, Path},
    uri::{Hierarchy, RelativeRef, Uri, UriReference},
};

#[derive(Default)]
pub struct BuilderInner {
    pub scheme: Option<Scheme>,
    pub authority: Option<Authority>,
    pub path: Path,
    pub query: Option<Query>,
    pub fragment: Option<Fragment>,
}

impl BuilderInner {
    fn hierarchy(&mut self) -> Hierarchy {
        Hierarchy::new(self.authority.take(), core::mem::take(&mut self.path))
    }
}

/// The kind of reference a builder produces.
pub trait Target: Sized {
    fn from_inner(inner: BuilderInner) -> Self;
}

impl Target for Uri {
    fn from_inner(mut inner: BuilderInner) -> Self {
        let hierarchy = inner.hierarchy();
        let Some(scheme) = inner.scheme else {
            // Typestates only allow a URI builder to end after a scheme.
            unreachable!("URI built without a scheme");
        };
        Uri::new(scheme, hierarchy, inner.query, inner.fragment)
    }
}

impl Target for RelativeRef {
    fn from_inner(mut inner: BuilderInner) -> Self {
        RelativeRef::new(inner.hierarchy(), inner.query, inner.fragment)
    }
}

impl Target for UriReference {
    fn from_inner(mut inner: BuilderInner) -> Self {
        let hierarchy = inner.hierarchy();
        match inner.scheme {
            Some(scheme) => Uri::new(scheme, hierarchy, inner.query, inner.fragment).into(),
            None => RelativeRef::new(hierarchy, inner.query, inner.fragment).into(),
        }
    }
}

/// Concatenates the representations of the components of a URI reference.
///
/// With a scheme the path is projected into a `hier-part`, otherwise into a
/// `relative-part`.
pub(crate) fn assemble(
    scheme: Option<&Scheme>,
    hierarchy: &Hierarchy,
    query: &Option<Query>,
    fragment: &Option<Fragment>,
    repr: Repr,
) -> Result<String> {
    let mut buf = String::new();
    let part = match scheme {
        Some(scheme) => {
            buf.push_str(&repr.render(scheme)?);
            buf.push(':');
            Part::Hier
        }
        None => Part::Relative,
    };
    buf.push_str(&hierarchy.project(part, repr)?);
    buf.push_str(&repr.render_prefixed("?", query)?);
    buf.push_str(&repr.render_prefixed("#", fragment)?);
    Ok(buf)
}
