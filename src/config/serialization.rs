//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the configuration as a TOML document that `FileConfig` parses
    pub fn to_toml(&self) -> String {
        let mut output = String::new();
        output.push_str("# docscout configuration\n");
        output.push_str("# Precedence: command-line flags > environment > this file > defaults\n\n");

        output.push_str("# Root of the document collection\n");
        output.push_str(&format!(
            "data_dir = {:?}\n",
            self.data_dir.display().to_string()
        ));
        output.push_str("# Extensions the file selector accepts (case-sensitive)\n");
        output.push_str(&format!(
            "allowed_extensions = {:?}\n",
            self.allowed_extensions
        ));
        output.push_str(&format!("embed_url = {:?}\n", self.embed_url));
        output.push_str(&format!(
            "request_timeout_secs = {}\n",
            self.request_timeout_secs
        ));
        output.push_str("# Error banner lifetime; values below 2000 are raised to 2000\n");
        output.push_str(&format!("error_timeout_ms = {}\n", self.error_timeout_ms));
        output.push_str(&format!("placeholder = {:?}\n", self.placeholder));
        output.push_str(&format!("input_width = {}\n", self.input_width));
        match &self.content_path {
            Some(path) => output.push_str(&format!(
                "content_path = {:?}\n",
                path.display().to_string()
            )),
            None => output.push_str("# content_path = \"./welcome.md\"\n"),
        }
        output.push_str(&format!("embed_on_startup = {}\n", self.embed_on_startup));
        output.push_str(&format!("theme = {:?}\n", self.theme));

        output.push_str("\n[logging]\n");
        output.push_str(&format!("level = {:?}\n", self.logging.level));
        output.push_str(&format!("file_enabled = {}\n", self.logging.file_enabled));
        output.push_str(&format!(
            "file_dir = {:?}\n",
            self.logging.file_dir.display().to_string()
        ));
        output.push_str(&format!(
            "file_rotation = {:?}\n",
            self.logging.file_rotation.as_str()
        ));
        output.push_str(&format!("file_prefix = {:?}\n", self.logging.file_prefix));

        output
    }
}
