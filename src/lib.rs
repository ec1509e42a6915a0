//! Pagesmith is a small HTTP service which generates PDF documents and writes them to an output directory:
//! a text report drawn on a blank page, a template filled with the fields of a request and stamped with
//! a signature, a multi-page table of transactions and the merge of a filled template with a term document.
//!
//! PDF documents are represented by the struct `PdfDocument`, which offers a high-level interface
//! on top of `lopdf` for drawing text, rectangles and images and for moving pages between documents.
//! The handlers of the service are plain synchronous functions, so they can also be used without the server.

/// The settings of the service, read from a JSON file in which every entry is optional.
pub mod configuration;

/// This module contains the `ContextError` type which is the error type used throughout this library.
///
/// The `ContextError` type is always returned from a `Result` type, which means that the caller can expect to obtain
/// an explanation whenever a function fails. If the failure was propagated from another library, the message
/// of the original error is kept as well.
pub mod error;

pub mod fields;

/// Merging of a filled template (or the shared one) with the term document.
pub mod merge;

/// Amounts of money in integer cents, formatted the Brazilian way.
pub mod money;

/// The module where the `PdfDocument` interface is presented.
///
/// # Introduction
///
/// A `PdfDocument` is either created empty or loaded from a file. Pages are drawn through a `DrawingSurface`,
/// which collects the operations and only attaches them to the page once it is finished: the surface either
/// replaces the content of the page or is appended after it. Text is written with the standard Helvetica fonts,
/// hence it is encoded with `WinAnsiEncoding` and characters outside of it are replaced.
///
/// Pages of another document can be appended with `append_pages_from`, which keeps their order and the
/// attributes they inherited from their original page tree.
pub mod pdf;

pub mod report;

/// The HTTP surface of the service.
pub mod server;

pub mod template;

/// The single page activity report.
pub mod text_report;
