//! PDF adapter for the printable enrollment form

mod form_renderer;

pub use form_renderer::PdfFormRenderer;
