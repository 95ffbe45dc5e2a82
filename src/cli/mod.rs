pub mod chat;

use clap::Subcommand;

use crate::connector::adapter::{DEFAULT_BASE_URL, DEFAULT_RELAY_URL};
use crate::domain::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP relay (`POST /api/chat`, `POST /api/feedback`)
    Serve {
        /// Address to bind the listener to
        #[arg(long, env = "CHATRELAY_BIND", default_value = "127.0.0.1:3000")]
        bind: String,

        #[arg(long, env = "GOOGLE_GENERATIVE_AI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Hard cap on tokens generated per response
        #[arg(long, default_value_t = DEFAULT_MAX_OUTPUT_TOKENS)]
        max_output_tokens: u32,

        /// Override the built-in persona instruction
        #[arg(long)]
        persona: Option<String>,

        /// Answer with an offline echo model instead of calling Gemini
        #[arg(long)]
        mock_model: bool,
    },

    /// Chat with a running relay from the terminal
    Chat {
        /// Base URL of the relay server
        #[arg(long, env = "CHATRELAY_URL", default_value = DEFAULT_RELAY_URL)]
        url: String,

        /// Silently drop non-string replies instead of showing an error turn
        #[arg(long)]
        drop_malformed: bool,
    },
}
