//! Generator for the Autorização para Uso de Dados e Marca.
//!
//! The granting partner authorizes the counterparty to publish its company
//! data and logo on the counterparty's website. One document is produced per
//! partner; the layout and legal prose are fixed, only the partner and
//! counterparty fields vary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::common::{format_portuguese_today, sanitize_file_stem};
use super::document::{Alignment, Document, PageSetup, TextStyle};
use super::traits::RenderEngine;
use super::{DocumentError, GeneratedDocument};
use crate::config::CounterpartyProfile;
use crate::partner::PartnerRecord;
use crate::storage::DocumentSink;

pub const TITLE: &str = "AUTORIZAÇÃO PARA USO DE DADOS E MARCA";

const BODY_SIZE: u32 = 12;
const TITLE_SIZE: u32 = 14;
const SIGNATURE_FIELD_SIZE: u32 = 8;
const TITLE_FONT: &str = "Arial";

const DISCLOSURE_CHECKLIST: [&str; 6] = [
    "Dados autorizados pela CONCEDENTE para divulgação: ",
    "Logo Marca (a ser disponibilizada em formato adequado)",
    "Nome Comercial ou Fantasia da CONCEDENTE: (Indicar o nome da forma que a CONCEDENTE deseja sua divulgação)",
    "Endereço completo: (Logradouro, número, bairro, cidade e estado)",
    "Telefone de contato: (DDD + número)",
    "e-mail de contato: (e-mail)",
];

/// Build the authorization document for one partner.
///
/// `signing_date` is the already formatted long date placed in the opening
/// clause.
pub fn build_authorization(
    partner: &PartnerRecord,
    counterparty: &CounterpartyProfile,
    logo_path: &Path,
    signing_date: &str,
) -> Document {
    let body = || TextStyle::sized(BODY_SIZE);
    let short = &counterparty.short_name;

    let mut doc = Document::new(PageSetup::default());

    doc.paragraph(Alignment::Center).add_image(logo_path);

    doc.paragraph(Alignment::Center).add_text(
        TITLE,
        TextStyle::sized(TITLE_SIZE).font(TITLE_FONT).bold(),
    );

    doc.paragraph(Alignment::Justify).add_text(
        format!(
            "A presente Autorização para Uso de Dados e Marca (doravante denominado “AUTORIZAÇÃO”) é celebrado, em {} (a “Data de Assinatura”).",
            signing_date
        ),
        body(),
    );

    // Grant of rights
    doc.paragraph(Alignment::Justify).add_text(
        format!(
            "{name}, pessoa jurídica de direito privado, com sede na cidade de {city}, Estado de {state}, com sede em {street}, {number}, {neighborhood}, {zip}, inscrita no CNPJ/ME sob o nº {tax_id}, neste ato representada por seu representante legal abaixo assinado (doravante denominada “CONCEDENTE”), concede neste ato, à {cp_name}, sociedade empresária limitada inscrita no CNPJ/ME sob nº {cp_tax_id}, situada no Município de {cp_city}, Estado do {cp_state}, na {cp_address}, {cp_number}, {cp_neighborhood} (“{short}”) uma autorização de uso e reprodução de seus dados, tais como denominação, nome fantasia, endereço, telefone, e-mail para contato, e logomarca protegidos pelas normas de Propriedade Intelectual e Proteção de Dados vigentes no Brasil para fins exclusivos de divulgação no web site da {short}.",
            name = partner.name,
            city = partner.city,
            state = partner.state,
            street = partner.street,
            number = partner.number,
            neighborhood = partner.neighborhood,
            zip = partner.postal_code,
            tax_id = partner.tax_id,
            cp_name = counterparty.name,
            cp_tax_id = counterparty.tax_id,
            cp_city = counterparty.city,
            cp_state = counterparty.state,
            cp_address = counterparty.address,
            cp_number = counterparty.number,
            cp_neighborhood = counterparty.neighborhood,
            short = short,
        ),
        body(),
    );

    // Sublicensing restriction
    doc.paragraph(Alignment::Justify).add_text(
        format!(
            "A CONCEDENTE ressalva que a {short} somente poderá ceder, transferir ou sublicenciar a terceiros a autorização de uso de dados de logomarca da titularidade da CONCEDENTE, com a expressa anuência da CONCEDENTE."
        ),
        body(),
    );

    // Gratuitous nature
    doc.paragraph(Alignment::Justify).add_text(
        format!(
            "A presente Autorização é celebrada a título gratuito, não incidindo à CONCEDENTE ou a {short} quaisquer ônus, custos, repasses orçamentários ou dispêndio pecuniário, a qualquer título, bem como não implica a cessão ou transferência de quaisquer direitos de propriedade intelectual da CONCEDENTE à {short}."
        ),
        body(),
    );

    // No corporate affiliation
    doc.paragraph(Alignment::Justify).add_text(
        format!(
            "A {short} não detém participação societária na CONCEDENTE e, da mesma forma, a CONCEDENTE não detém participação societária na {short}, de forma que esta Autorização não institui sociedade empresária ou qualquer vínculo societário similar entre CONCEDENTE e {short}. A CONCEDENTE não é representante legal ou agente da {short} e, da mesma forma, a {short} também não é representante legal ou agente da CONCEDENTE e, portanto, estas não poderão assumir ou criar qualquer espécie adicional de obrigação, representação, garantia ou fiança, expressa ou implícita, em nome da outra."
        ),
        body(),
    );

    // Term and revocation
    doc.paragraph(Alignment::Justify).add_text(
        format!(
            "A presente Autorização entra em vigor a partir da sua Data de Assinatura e vigorará por prazo indeterminado. A CONCEDENTE poderá revogar esta Autorização, a qualquer momento, e de pleno direito independentemente de interpelação judicial ou extrajudicial, mediante aviso prévio por escrito de 30 (trinta) dias de antecedência à {short}, independentemente do motivo."
        ),
        body(),
    );

    let checklist = doc.paragraph(Alignment::Justify);
    for (i, item) in DISCLOSURE_CHECKLIST.iter().enumerate() {
        if i > 0 {
            checklist.add_line_break();
        }
        checklist.add_text(*item, body());
    }

    doc.paragraph(Alignment::Justify).add_text(
        "Esta Autorização é celebrada, regida e interpretada de acordo com as leis da República Federativa do Brasil.",
        body(),
    );

    // Signature block
    doc.paragraph(Alignment::Justify);
    doc.paragraph(Alignment::Center)
        .add_text(
            "___________________________________________________________",
            body(),
        )
        .add_line_break()
        .add_text(partner.name.clone(), body());
    doc.paragraph(Alignment::Center).add_text(
        "Nome:_________________________________________",
        TextStyle::sized(SIGNATURE_FIELD_SIZE),
    );
    doc.paragraph(Alignment::Center).add_text(
        "Cargo:_________________________________________",
        TextStyle::sized(SIGNATURE_FIELD_SIZE),
    );

    doc
}

/// Assembles, renders and writes one authorization per partner.
pub struct AuthorizationGenerator {
    counterparty: Arc<CounterpartyProfile>,
    engine: Arc<dyn RenderEngine>,
    sink: Arc<dyn DocumentSink>,
    logo_path: PathBuf,
}

impl AuthorizationGenerator {
    pub fn new(
        counterparty: Arc<CounterpartyProfile>,
        engine: Arc<dyn RenderEngine>,
        sink: Arc<dyn DocumentSink>,
        logo_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            counterparty,
            engine,
            sink,
            logo_path: logo_path.into(),
        }
    }

    /// Output filename for a partner: sanitized name plus the engine's extension.
    pub fn output_filename(&self, partner: &PartnerRecord) -> String {
        format!(
            "{}.{}",
            sanitize_file_stem(&partner.name),
            self.engine.extension()
        )
    }

    /// Generate and write the document for one partner.
    ///
    /// Completes only after the file is fully written; any render or write
    /// failure is logged with the partner name and returned.
    pub async fn assemble(
        &self,
        partner: &PartnerRecord,
    ) -> Result<GeneratedDocument, DocumentError> {
        self.assemble_dated(partner, &format_portuguese_today()).await
    }

    pub async fn assemble_dated(
        &self,
        partner: &PartnerRecord,
        signing_date: &str,
    ) -> Result<GeneratedDocument, DocumentError> {
        let document =
            build_authorization(partner, &self.counterparty, &self.logo_path, signing_date);
        let filename = self.output_filename(partner);

        let result = self.render_and_write(&document, &filename).await;
        match &result {
            Ok((path, size)) => {
                log::info!("Generated {} ({} bytes) for {}", path.display(), size, partner.name);
            }
            Err(e) => {
                log::error!("{} failed: {}", partner.name, e);
            }
        }

        let (path, size) = result?;
        Ok(GeneratedDocument {
            partner_name: partner.name.clone(),
            filename,
            path,
            size,
        })
    }

    async fn render_and_write(
        &self,
        document: &Document,
        filename: &str,
    ) -> Result<(PathBuf, usize), DocumentError> {
        let bytes = self.engine.render(document).await?;
        let path = self.sink.write_document(filename, &bytes).await?;
        Ok((path, bytes.len()))
    }
}
