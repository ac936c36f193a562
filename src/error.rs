//! Build failures.

use quick_error::quick_error;

quick_error! {
    /// Error raised while generating a body.
    ///
    /// Every failure is fatal to the build in progress; nothing is retried
    /// and partial results are discarded wholesale.
    #[derive(Debug)]
    pub enum Error {
        /// A bone spec names a parent that was never registered.
        UnknownParent(name: String) {
            display("bone {:?} names a parent that is not in the skeleton", name)
        }
        /// A bone name was registered twice within one build.
        DuplicateBone(name: String) {
            display("bone name {:?} is already registered", name)
        }
        /// A stop sequence was built without any stops.
        NoStops {
            display("a stop sequence needs at least one stop")
        }
        /// Stop offsets must be non-decreasing.
        DecreasingOffset(index: usize) {
            display("stop {} has a smaller offset than its predecessor", index)
        }
        /// A body-part spec fails basic sanity checks.
        InvalidSpec(reason: &'static str) {
            display("invalid body-part spec: {}", reason)
        }
        /// The extrusion inputs cannot produce a volume.
        DegenerateExtrusion(reason: &'static str) {
            display("degenerate extrusion: {}", reason)
        }
        /// Geometry fed to the solid builder carries no skinning weights,
        /// so there is nothing to tunnel through the UV channel.
        MissingWeights {
            display("geometry carries no skinning weights to tunnel through the solid")
        }
        /// A boolean operation produced (or was handed) an empty solid.
        EmptySolid {
            display("boolean solid has no polygons")
        }
        /// A tunneled UV decoded to a bone index outside the skeleton.
        /// Indicates an encoding bug, never tolerated.
        BoneIndexRange(index: usize, bones: usize) {
            display("decoded bone index {} is outside the {} registered bones", index, bones)
        }
    }
}
