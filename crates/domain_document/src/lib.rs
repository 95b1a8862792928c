//! Document Domain
//!
//! Documents carry a [`DocumentCategory`] and a free-text description.
//! This crate holds the [`Document`] entity, the [`DocumentRepository`]
//! port with an in-memory adapter, and the five use-case services.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use core_kernel::DefaultClock;
//! use domain_document::{CreateDocument, DocumentCategory, DocumentData, InMemoryDocumentRepository};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let create = CreateDocument::new(
//!     Arc::new(InMemoryDocumentRepository::new()),
//!     Arc::new(DefaultClock),
//! );
//! let document = create
//!     .handle(DocumentData::new(DocumentCategory::Identification, "National identity card"))
//!     .await
//!     .unwrap();
//! assert_eq!(document.document_type().as_str(), "DOCUMENTO_IDENTIFICACAO");
//! # }
//! ```

pub mod category;
pub mod criteria;
pub mod document;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use category::DocumentCategory;
pub use criteria::DocumentCriteria;
pub use document::{Document, DocumentData};
pub use error::DocumentError;
pub use ports::memory::InMemoryDocumentRepository;
pub use ports::DocumentRepository;
pub use services::{
    CreateDocument, FindDocuments, ListDocuments, RemoveDocument, UpdateDocument, UpdateDocumentData,
    UpdateDocumentRequest,
};
