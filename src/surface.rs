/*!
The element a clock face is drawn on.

Faces are displayed by an `<object>` element. Its `data` attribute holds the path of the current face:

```html
<object id="sandial-clock-img" type="image/svg+xml" data="clocks/clock_09_05.svg"></object>
```

Some engines don't reload an `<object>` when only its `data` attribute changes. [`Surface::render`] writes `data`, then flips `type` to a placeholder and back to `image/svg+xml` so the object is always invalidated. This is the only render strategy; the displayed face is always read back from `data`.
*/

use crate::Error;

/**
The attribute holding the path of the displayed face.
*/
pub const DATA_ATTRIBUTE: &str = "data";

/**
The attribute holding the content type of the displayed face.
*/
pub const TYPE_ATTRIBUTE: &str = "type";

/**
The content type of every face.
*/
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

// Any value the engine doesn't recognize works here
const INVALIDATE_CONTENT_TYPE: &str = "application/x-sandial-invalidate";

/**
A page that clock elements can be found in.
*/
pub trait Document {
    /**
    The type of element found in the page.
    */
    type Element: Element;

    /**
    Find the element with the given `id`.
    */
    fn find(&self, id: &str) -> Option<Self::Element>;
}

/**
An element in a [`Document`].
*/
pub trait Element {
    /**
    Get the value of an attribute, if it's set.
    */
    fn attribute(&self, name: &str) -> Option<String>;

    /**
    Set the value of an attribute.
    */
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), Error>;
}

impl<'a, T: Document + ?Sized> Document for &'a T {
    type Element = T::Element;

    fn find(&self, id: &str) -> Option<Self::Element> {
        (**self).find(id)
    }
}

/**
An element displaying clock faces.
*/
#[derive(Debug, Clone)]
pub struct Surface<E> {
    element: E,
}

impl<E: Element> Surface<E> {
    /**
    Draw faces on `element`.
    */
    pub fn new(element: E) -> Self {
        Surface { element }
    }

    /**
    The path of the face currently displayed.
    */
    pub fn source(&self) -> Option<String> {
        self.element.attribute(DATA_ATTRIBUTE)
    }

    /**
    Display the face at `path`.
    */
    pub fn render(&mut self, path: &str) -> Result<(), Error> {
        self.element.set_attribute(DATA_ATTRIBUTE, path)?;

        self.element
            .set_attribute(TYPE_ATTRIBUTE, INVALIDATE_CONTENT_TYPE)?;
        self.element.set_attribute(TYPE_ATTRIBUTE, SVG_CONTENT_TYPE)?;

        Ok(())
    }

    /**
    Get a reference to the underlying element.
    */
    pub fn element(&self) -> &E {
        &self.element
    }
}
