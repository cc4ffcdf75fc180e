/*!
The [`WebDocument`] and [`WebElement`] types.
*/

use crate::{
    surface::{Document, Element},
    Error,
};

/**
A document based on the page's [`web_sys::Document`].
*/
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /**
    Find elements in `document`.
    */
    pub fn new(document: web_sys::Document) -> Self {
        WebDocument { document }
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn find(&self, id: &str) -> Option<WebElement> {
        self.document.get_element_by_id(id).map(WebElement::new)
    }
}

/**
An element based on a [`web_sys::Element`].
*/
#[derive(Debug, Clone)]
pub struct WebElement {
    element: web_sys::Element,
}

impl WebElement {
    /**
    Read and write attributes of `element`.
    */
    pub fn new(element: web_sys::Element) -> Self {
        WebElement { element }
    }
}

impl Element for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.element
            .set_attribute(name, value)
            .map_err(|err| Error::from_js("failed to set attribute", err))
    }
}
