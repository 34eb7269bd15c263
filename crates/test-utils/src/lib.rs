use async_trait::async_trait;
use flashgen::errors::PromptError;
use flashgen::providers::ai::AiProvider;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }
}

// --- Test-Specific Helpers ---
pub mod helpers {
    /// What a fixture page holds.
    #[derive(Debug, Clone, Copy)]
    pub enum TestPage<'a> {
        /// One line of text per entry, drawn with a standard font.
        Text(&'a [&'a str]),
        /// A filled rectangle and no text, like a scanned page.
        Graphic,
        /// A hand-written content stream. `/F1` is available as the font.
        Raw(&'a str),
        /// A content stream declared as `FlateDecode` that does not inflate.
        Corrupt,
    }

    /// Generates a PDF with one page of text per entry of `pages`.
    pub fn generate_test_pdf(pages: &[&str]) -> Vec<u8> {
        let pages: Vec<[&str; 1]> = pages.iter().map(|text| [*text]).collect();
        let layout: Vec<TestPage<'_>> = pages.iter().map(|p| TestPage::Text(p)).collect();
        generate_test_pdf_with(&layout)
    }

    /// Generates a PDF from explicit page layouts.
    ///
    /// Text is written with literal strings and the `WinAnsiEncoding` Helvetica base
    /// font, so the bytes of each `Tj` operand are the ASCII text itself.
    pub fn generate_test_pdf_with(pages: &[TestPage<'_>]) -> Vec<u8> {
        let page_count = pages.len();
        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", 4 + 2 * i))
            .collect();

        let mut objects: Vec<String> = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_count
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        for (i, page) in pages.iter().enumerate() {
            let content_id = 5 + 2 * i;
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
            ));
            let stream = content_stream(page);
            let filter = match page {
                TestPage::Corrupt => " /Filter /FlateDecode",
                _ => "",
            };
            objects.push(format!(
                "<< /Length {}{} >>\nstream\n{}\nendstream",
                stream.len(),
                filter,
                stream
            ));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));
        out.extend_from_slice(xref.as_bytes());
        out
    }

    fn content_stream(page: &TestPage<'_>) -> String {
        match page {
            TestPage::Text(lines) => {
                let mut ops = String::from("BT\n/F1 12 Tf\n14 TL\n72 720 Td\n");
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        ops.push_str("T*\n");
                    }
                    ops.push_str(&format!("({}) Tj\n", escape(line)));
                }
                ops.push_str("ET");
                ops
            }
            TestPage::Graphic => "0.5 g\n72 72 468 648 re\nf".to_string(),
            TestPage::Raw(ops) => ops.to_string(),
            TestPage::Corrupt => "this is not zlib data".to_string(),
        }
    }

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }
}
