//! External-edge concerns: mapping the loosely-typed store rows into the
//! strict domain structures and back.

pub mod normalize;
