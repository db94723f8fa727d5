//! Optional-field patch contract
//!
//! A patch is a partial update where every field is optional. Applying it
//! overwrites exactly the fields that are present and leaves the rest of the
//! target alone, whatever value they hold.

/// A partial update that can be laid over a full record of type `T`.
pub trait Patch<T> {
    /// Overwrite every field of `target` that is present in this patch.
    fn apply_to(self, target: &mut T);
}

/// Replace `slot` with `value` when a value is present.
pub fn overlay<V>(slot: &mut V, value: Option<V>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Merge `patch` onto a copy of `current` and return the merged record.
pub fn merge<T, P>(current: &T, patch: P) -> T
where
    T: Clone,
    P: Patch<T>,
{
    let mut merged = current.clone();
    patch.apply_to(&mut merged);
    merged
}

/// Implement [`Patch`] for a struct of `Option` fields whose names match the
/// target record's fields one to one.
#[macro_export]
macro_rules! impl_patch {
    ($patch:ty => $target:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::domain::value_objects::Patch<$target> for $patch {
            fn apply_to(self, target: &mut $target) {
                $(
                    $crate::domain::value_objects::overlay(&mut target.$field, self.$field);
                )+
            }
        }
    };
}
