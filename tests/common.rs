#![allow(dead_code)]

use partner_authorization_docs::config::CounterpartyProfile;
use partner_authorization_docs::db::{PartnerStore, QueryError};
use partner_authorization_docs::generators::{Document, RenderEngine, RenderError};
use partner_authorization_docs::partner::RawPartnerRow;
use partner_authorization_docs::storage::{DocumentSink, WriteError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock partner store returning fixed rows, or failing with a message.
pub struct MockPartnerStore {
    result: Result<Vec<RawPartnerRow>, String>,
}

impl MockPartnerStore {
    pub fn with_rows(rows: Vec<RawPartnerRow>) -> Self {
        Self { result: Ok(rows) }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl PartnerStore for MockPartnerStore {
    async fn fetch_partner_rows(&self) -> Result<Vec<RawPartnerRow>, QueryError> {
        match &self.result {
            Ok(rows) => Ok(rows.clone()),
            Err(message) => Err(QueryError::Store(message.clone())),
        }
    }
}

/// Mock engine that "renders" the document's plain text, failing for any
/// document whose text contains `fail_on`.
pub struct MockRenderEngine {
    fail_on: Option<String>,
    rendered: Arc<Mutex<Vec<Document>>>,
}

impl MockRenderEngine {
    pub fn new() -> Self {
        Self {
            fail_on: None,
            rendered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            ..Self::new()
        }
    }

    pub async fn rendered(&self) -> Vec<Document> {
        self.rendered.lock().await.clone()
    }
}

pub fn document_text(document: &Document) -> String {
    document
        .paragraphs()
        .iter()
        .map(|p| p.plain_text())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait::async_trait]
impl RenderEngine for MockRenderEngine {
    fn extension(&self) -> &str {
        "pdf"
    }

    async fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        let text = document_text(document);
        if let Some(marker) = &self.fail_on {
            if text.contains(marker.as_str()) {
                return Err(RenderError::Engine("engine exploded".to_string()));
            }
        }
        self.rendered.lock().await.push(document.clone());
        Ok(text.into_bytes())
    }
}

/// In-memory sink, optionally refusing one filename.
pub struct MockDocumentSink {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    order: Arc<Mutex<Vec<String>>>,
    reject: Option<String>,
}

impl MockDocumentSink {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            order: Arc::new(Mutex::new(Vec::new())),
            reject: None,
        }
    }

    pub fn rejecting(filename: &str) -> Self {
        Self {
            reject: Some(filename.to_string()),
            ..Self::new()
        }
    }

    pub async fn has_file(&self, filename: &str) -> bool {
        self.files.lock().await.contains_key(filename)
    }

    pub async fn file(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(filename).cloned()
    }

    pub async fn file_count(&self) -> usize {
        self.files.lock().await.len()
    }

    pub async fn write_order(&self) -> Vec<String> {
        self.order.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl DocumentSink for MockDocumentSink {
    async fn write_document(&self, filename: &str, data: &[u8]) -> Result<PathBuf, WriteError> {
        let path = PathBuf::from("/mock/output").join(filename);
        if self.reject.as_deref() == Some(filename) {
            return Err(WriteError::WriteFile {
                path,
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.files
            .lock()
            .await
            .insert(filename.to_string(), data.to_vec());
        self.order.lock().await.push(filename.to_string());
        Ok(path)
    }
}

pub fn counterparty() -> CounterpartyProfile {
    CounterpartyProfile {
        name: "Megabit Sistemas Ltda".to_string(),
        short_name: "Megabit".to_string(),
        tax_id: "00.111.222/0001-33".to_string(),
        city: "Campo Grande".to_string(),
        state: "Mato Grosso do Sul".to_string(),
        address: "Av. República Argentina".to_string(),
        number: "3370".to_string(),
        neighborhood: "Jardim Panorama".to_string(),
    }
}

/// Eligible row with every column filled.
pub fn partner_row(name: &str) -> RawPartnerRow {
    RawPartnerRow {
        razaosocial: Some(name.to_string()),
        cgc: Some("11.222.333/0001-44".to_string()),
        endereco: Some("Rua das Flores".to_string()),
        numero: Some("42".to_string()),
        bairro: Some("Centro".to_string()),
        cidade: Some("Campinas".to_string()),
        uf: Some("SP".to_string()),
        cep: Some("13010-000".to_string()),
        datacancelamento: None,
        tipo: Some("cliente".to_string()),
    }
}

pub fn acme_row() -> RawPartnerRow {
    RawPartnerRow {
        razaosocial: Some("ACME SA".to_string()),
        cgc: Some("12.345".to_string()),
        endereco: Some("Rua X".to_string()),
        numero: Some("10".to_string()),
        bairro: Some(String::new()),
        cidade: Some("SP".to_string()),
        uf: Some("SP".to_string()),
        cep: Some("01000".to_string()),
        datacancelamento: None,
        tipo: Some("Cliente".to_string()),
    }
}
