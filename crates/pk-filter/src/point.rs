use pk_core::{Plane, Sample};

/// Adds `delta` to every interior sample. Border samples, dimensions, and
/// stride are left as they are.
pub fn brighten<T: Sample>(plane: &mut Plane<T>, delta: T) {
    for r in 0..plane.height() as isize {
        for v in plane.row_mut(r) {
            *v = v.offset(delta);
        }
    }
    log::debug!(
        "brightened {}x{} plane by {delta:?}",
        plane.width(),
        plane.height()
    );
}
