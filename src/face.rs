/*!
Addressing pre-rendered clock faces.

Each face is an SVG file named `clock_<HH>_<MM>.svg`, where `HH` and `MM` are the zero-padded hour and minute. All 1,440 faces live together in one directory, `clocks` by default.
*/

use core::fmt;

/**
The default directory clock faces are served from, relative to the page.
*/
pub const DEFAULT_ASSET_DIR: &str = "clocks";

/**
Get the path of the face for `hour` and `minute` in the default asset directory.

```
assert_eq!("clocks/clock_09_05.svg", sandial::face_path(9, 5));
```
*/
pub fn face_path(hour: u8, minute: u8) -> String {
    Face::new_unchecked(hour, minute)
        .path(DEFAULT_ASSET_DIR)
        .to_string()
}

/**
One of the 1,440 clock faces.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Face {
    hour: u8,
    minute: u8,
}

impl Face {
    /**
    Get the face for `hour` and `minute`.

    This method returns `None` if `hour` isn't in `0..=23` or `minute` isn't in `0..=59`.
    */
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }

        Some(Face { hour, minute })
    }

    pub(crate) const fn new_unchecked(hour: u8, minute: u8) -> Self {
        Face { hour, minute }
    }

    /**
    The hour shown on this face.
    */
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /**
    The minute shown on this face.
    */
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /**
    The path to this face inside `asset_dir`.
    */
    pub fn path<'a>(&self, asset_dir: &'a str) -> FacePath<'a> {
        FacePath {
            asset_dir,
            face: *self,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "clock_{:02}_{:02}.svg", self.hour, self.minute)
    }
}

/**
The relative path to a [`Face`].

The path is formatted through its [`fmt::Display`] implementation.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacePath<'a> {
    asset_dir: &'a str,
    face: Face,
}

impl<'a> FacePath<'a> {
    /**
    The face this path points to.
    */
    pub fn face(&self) -> Face {
        self.face
    }

    /**
    Whether `displayed` is exactly this path.
    */
    pub fn matches(&self, displayed: &str) -> bool {
        displayed == self.to_string()
    }
}

impl<'a> fmt::Display for FacePath<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.asset_dir.is_empty() {
            return fmt::Display::fmt(&self.face, f);
        }

        write!(f, "{}/{}", self.asset_dir, self.face)
    }
}
