/*!
 * Common test utilities for the mqxlate test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a minimal mqxliff document around the given trans-unit bodies.
///
/// Each entry is the inner XML of one trans-unit, id assigned in order
/// starting at 1.
pub fn sample_mqxliff(units: &[&str]) -> String {
    let mut body = String::new();
    for (index, unit) in units.iter().enumerate() {
        body.push_str(&format!(
            "      <trans-unit id=\"{}\">\n{}\n      </trans-unit>\n",
            index + 1,
            unit
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" xmlns:mq="MQXliff">
  <file original="sample.docx" source-language="en" target-language="fr">
    <body>
{body}    </body>
  </file>
</xliff>"#
    )
}

/// One trans-unit body with a plain source and empty target
pub fn plain_unit(source: &str) -> String {
    format!("        <source>{source}</source>\n        <target/>")
}

/// A small TMX document for the en/fr pair
pub fn sample_tmx(pairs: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (source, target) in pairs {
        body.push_str(&format!(
            "  <tu>\n    <tuv xml:lang=\"en\"><seg>{source}</seg></tuv>\n    <tuv xml:lang=\"fr\"><seg>{target}</seg></tuv>\n  </tu>\n"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<tmx version=\"1.4\"><body>\n{body}</body></tmx>"
    )
}
