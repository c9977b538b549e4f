use askama::Template;

/// Document head with the embedded stylesheet, up to the opening of the body
#[derive(Template)]
#[template(path = "page_header.html")]
pub struct PageHeaderTemplate<'a> {
    /// Page title, escaped by the template
    pub title: &'a str,
}

/// Closes the body region and the document
#[derive(Template)]
#[template(path = "page_footer.html")]
pub struct PageFooterTemplate;

/// Opening of the navigation pane
#[derive(Template)]
#[template(path = "nav_begin.html")]
pub struct NavBeginTemplate;

/// Opening of the content pane with its heading
#[derive(Template)]
#[template(path = "content_begin.html")]
pub struct ContentBeginTemplate<'a> {
    pub title: &'a str,
}
