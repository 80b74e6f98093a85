//! Copy-on-write update primitive.
//!
//! [`produce`] lets a transition be written as an imperative edit on a
//! draft while the caller's value stays untouched. The draft is an owned
//! deep clone, so the result and the base never share mutable substructure.

/// Apply `recipe` to a clone of `base` and return the edited clone.
///
/// `base` is only borrowed; it is observably unchanged after the call.
///
/// ```
/// use rewind_core::produce;
///
/// let base = vec![1, 2, 3];
/// let next = produce(&base, |draft| draft.push(4));
/// assert_eq!(base, vec![1, 2, 3]);
/// assert_eq!(next, vec![1, 2, 3, 4]);
/// ```
pub fn produce<T, F>(base: &T, recipe: F) -> T
where
    T: Clone,
    F: FnOnce(&mut T),
{
    let mut draft = base.clone();
    recipe(&mut draft);
    draft
}
