pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ConversationClient, GenerativeModel, MalformedResponsePolicy, RecordFeedbackUseCase,
    RejectReason, RelayConversationUseCase, RelayTransport, SendOutcome, ERROR_SENTINEL,
    MALFORMED_RESPONSE_TEXT, TRANSPORT_ERROR_TEXT, WELCOME_MESSAGE,
};

pub use connector::{
    router, serve, Container, ContainerConfig, GeminiClient, HttpRelayTransport,
    MockGenerativeModel, CHAT_ROUTE, FEEDBACK_ROUTE,
};

pub use domain::{
    ChatSession, DomainError, Feedback, GenerationConfig, Part, Role, Transcript, Turn,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_PERSONA,
};
