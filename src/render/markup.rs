use crate::render::primitives::{Attributes, escape_xml};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Append-only builder for one SVG document.
///
/// Containers are only reachable through closures ([`MarkupBuilder::group`],
/// [`MarkupBuilder::container`]), so every opened element is closed exactly
/// once and [`MarkupBuilder::finish`] always yields a complete document.
/// Attribute values are not validated.
#[derive(Debug)]
pub struct MarkupBuilder {
    out: String,
    depth: usize,
}

impl MarkupBuilder {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut out = String::with_capacity(2048);
        let attrs = Attributes::new()
            .with("xmlns", SVG_NAMESPACE)
            .with("width", width.to_string())
            .with("height", height.to_string())
            .with("viewBox", format!("0 0 {width} {height}"));
        out.push_str("<svg");
        attrs.write_into(&mut out);
        out.push('>');
        Self { out, depth: 0 }
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, attrs: Attributes) -> &mut Self {
        let attrs = attrs
            .with_number("x", x)
            .with_number("y", y)
            .with_number("width", width)
            .with_number("height", height);
        self.empty_element("rect", &attrs)
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, attrs: Attributes) -> &mut Self {
        let attrs = attrs
            .with_number("x1", x1)
            .with_number("y1", y1)
            .with_number("x2", x2)
            .with_number("y2", y2);
        self.empty_element("line", &attrs)
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, attrs: Attributes) -> &mut Self {
        let attrs = attrs
            .with_number("cx", cx)
            .with_number("cy", cy)
            .with_number("r", r);
        self.empty_element("circle", &attrs)
    }

    pub fn path(&mut self, d: impl Into<String>, attrs: Attributes) -> &mut Self {
        let attrs = attrs.with("d", d);
        self.empty_element("path", &attrs)
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, attrs: Attributes) -> &mut Self {
        let attrs = attrs.with_number("x", x).with_number("y", y);
        self.text_element("text", &attrs, content)
    }

    /// `<title>` tooltip for the enclosing element.
    pub fn title(&mut self, content: &str) -> &mut Self {
        self.text_element("title", &Attributes::new(), content)
    }

    /// Emits a `<g>` container whose children are written by `children`.
    pub fn group(&mut self, attrs: Attributes, children: impl FnOnce(&mut Self)) -> &mut Self {
        self.container("g", attrs, children)
    }

    /// Emits any element with children, e.g. a `rect` carrying a tooltip.
    pub fn container(
        &mut self,
        tag: &'static str,
        attrs: Attributes,
        children: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.open_tag(tag, &attrs);
        self.depth += 1;
        children(self);
        self.depth -= 1;
        self.close_tag(tag);
        self
    }

    /// Closes the root element and returns the document.
    #[must_use]
    pub fn finish(mut self) -> String {
        debug_assert_eq!(self.depth, 0);
        self.out.push_str("</svg>");
        self.out
    }

    fn empty_element(&mut self, tag: &str, attrs: &Attributes) -> &mut Self {
        self.out.push('<');
        self.out.push_str(tag);
        attrs.write_into(&mut self.out);
        self.out.push_str("/>");
        self
    }

    fn text_element(&mut self, tag: &'static str, attrs: &Attributes, content: &str) -> &mut Self {
        self.open_tag(tag, attrs);
        self.out.push_str(&escape_xml(content));
        self.close_tag(tag);
        self
    }

    fn open_tag(&mut self, tag: &str, attrs: &Attributes) {
        self.out.push('<');
        self.out.push_str(tag);
        attrs.write_into(&mut self.out);
        self.out.push('>');
    }

    fn close_tag(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }
}
