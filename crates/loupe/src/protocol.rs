//! Inspector relay protocol.
//!
//! JSON messages tagged by `action`, as exchanged between a front end (a
//! popup, a DevTools panel, the CLI relay) and the page side. A [`Session`]
//! holds the inspector state and answers each [`Request`] with a
//! [`Response`]; it never fails, errors travel as `{"success": false}`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::codec::Syntax;
use crate::config::InspectorConfig;
use crate::dom::{self, Document};
use crate::generator::{RankedSummary, StrategyGenerator};
use crate::history::HistoryEntry;
use crate::strategy::Strategy;
use crate::validator::Validator;

/// Inspector mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Picking elements to generate locators for
    Generate,
    /// Pasting locators to validate
    Validate,
}

/// Incoming message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// Enter inspector mode
    Activate,
    /// Leave inspector mode
    Deactivate,
    /// Report whether inspector mode is on
    GetStatus,
    /// Enter generate mode, optionally switching syntax
    StartGenerate {
        /// Syntax name
        #[serde(default)]
        language: Option<String>,
    },
    /// Enter validate mode, optionally switching syntax
    StartValidate {
        /// Syntax name
        #[serde(default)]
        language: Option<String>,
    },
    /// Switch output syntax
    SetLanguage {
        /// Syntax name
        language: String,
    },
    /// Parse and execute locator code
    ValidateLocator {
        /// Locator source
        code: String,
    },
    /// Generate locators for the first element matching a CSS selector
    Generate {
        /// Target selector
        selector: String,
    },
    /// Leave any mode
    Stop,
}

/// Element identity reported with generated strategies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    /// Upper-case tag name
    pub tag_name: String,
    /// `class` attribute
    pub class_name: String,
    /// `id` attribute
    pub id: String,
}

/// Outgoing message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Plain acknowledgement
    Ack {
        /// Always true
        success: bool,
    },
    /// Reply to `getStatus`
    #[serde(rename_all = "camelCase")]
    Status {
        /// Inspector mode on
        is_active: bool,
        /// Same as `is_active`
        active: bool,
        /// Current mode
        mode: Option<Mode>,
    },
    /// Reply to `startGenerate` / `startValidate`
    Started {
        /// Always true
        success: bool,
        /// Always true
        active: bool,
        /// Mode entered
        mode: Mode,
    },
    /// Reply to `validateLocator`
    #[serde(rename_all = "camelCase")]
    Validated {
        /// Always true
        success: bool,
        /// Number of matches
        count: usize,
        /// Query duration in milliseconds
        timing: f64,
        /// Exactly one match
        is_unique: bool,
        /// Parsed strategy
        strategy: Strategy,
        /// Detected syntax
        syntax: Syntax,
    },
    /// Reply to `generate`
    Generated {
        /// Always true
        success: bool,
        /// Target element
        element: ElementInfo,
        /// Ranked candidates, best first
        strategies: Vec<RankedSummary>,
        /// Record for the best candidate
        history: HistoryEntry,
    },
    /// Failure
    Error {
        /// Always false
        success: bool,
        /// Message
        error: String,
    },
}

impl Response {
    const fn ack() -> Self {
        Self::Ack { success: true }
    }

    /// Failure reply carrying `message`
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            success: false,
            error: message.into(),
        }
    }

    /// False only for [`Response::Error`]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Error { .. })
    }
}

/// Inspector state for one page
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: InspectorConfig,
    active: bool,
    mode: Option<Mode>,
}

impl Session {
    /// Create an inactive session
    #[must_use]
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            config,
            active: false,
            mode: None,
        }
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Inspector mode on
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> Option<Mode> {
        self.mode
    }

    fn set_language(&mut self, language: Option<&str>) {
        if let Some(language) = language {
            self.config.syntax = Syntax::from_name_or_default(language);
            debug!(syntax = %self.config.syntax, "language set");
        }
    }

    fn enter(&mut self, mode: Mode) -> Response {
        self.active = true;
        self.mode = Some(mode);
        info!(?mode, "inspector active");
        Response::Started {
            success: true,
            active: true,
            mode,
        }
    }

    /// Answer one request against `document`
    pub fn handle(&mut self, document: &Document, request: Request) -> Response {
        debug!(?request, "handling request");
        match request {
            Request::Activate => {
                self.active = true;
                self.mode = Some(Mode::Generate);
                Response::ack()
            }
            Request::Deactivate | Request::Stop => {
                self.active = false;
                self.mode = None;
                Response::ack()
            }
            Request::GetStatus => Response::Status {
                is_active: self.active,
                active: self.active,
                mode: self.mode,
            },
            Request::StartGenerate { language } => {
                self.set_language(language.as_deref());
                self.enter(Mode::Generate)
            }
            Request::StartValidate { language } => {
                self.set_language(language.as_deref());
                self.enter(Mode::Validate)
            }
            Request::SetLanguage { language } => {
                self.set_language(Some(&language));
                Response::ack()
            }
            Request::ValidateLocator { code } => {
                match Validator::new(document, &self.config).validate(&code) {
                    Ok(validation) => Response::Validated {
                        success: true,
                        count: validation.result.count(),
                        timing: validation.result.timing.as_secs_f64() * 1000.0,
                        is_unique: validation.result.is_unique(),
                        strategy: validation.strategy,
                        syntax: validation.syntax,
                    },
                    Err(e) => Response::error(e.to_string()),
                }
            }
            Request::Generate { selector } => self.generate(document, &selector),
        }
    }

    fn generate(&mut self, document: &Document, selector: &str) -> Response {
        let element = match document.select_first(selector) {
            Ok(element) => element,
            Err(e) => return Response::error(e.to_string()),
        };
        // Picking an element ends inspector mode.
        self.active = false;
        self.mode = None;

        let generation = StrategyGenerator::new(document, &self.config).generate(element);
        let syntax = self.config.syntax;
        let Some(best) = generation.best() else {
            return Response::error("no strategies generated");
        };
        Response::Generated {
            success: true,
            element: ElementInfo {
                tag_name: dom::tag_name(element).to_ascii_uppercase(),
                class_name: dom::attr(element, "class").unwrap_or_default().to_string(),
                id: dom::attr(element, "id").unwrap_or_default().to_string(),
            },
            history: HistoryEntry::record(&best.strategy, syntax, element),
            strategies: generation.strategies.iter().map(|s| s.summary(syntax)).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<form><label>Username<input id="u"></label><button>Login</button></form>"#;

    fn request(json: &str) -> Request {
        serde_json::from_str(json).unwrap()
    }

    fn reply(session: &mut Session, doc: &Document, json: &str) -> serde_json::Value {
        serde_json::to_value(session.handle(doc, request(json))).unwrap()
    }

    mod wire_tests {
        use super::*;

        #[test]
        fn test_request_tags() {
            assert_eq!(request(r#"{"action":"getStatus"}"#), Request::GetStatus);
            assert_eq!(
                request(r#"{"action":"startGenerate"}"#),
                Request::StartGenerate { language: None }
            );
            assert_eq!(
                request(r#"{"action":"validateLocator","code":"x"}"#),
                Request::ValidateLocator { code: "x".into() }
            );
        }

        #[test]
        fn test_unknown_action_rejected() {
            assert!(serde_json::from_str::<Request>(r#"{"action":"showHelp"}"#).is_err());
        }
    }

    mod session_tests {
        use super::*;

        #[test]
        fn test_status_lifecycle() {
            let doc = Document::parse(PAGE);
            let mut session = Session::default();
            assert_eq!(
                reply(&mut session, &doc, r#"{"action":"getStatus"}"#),
                serde_json::json!({"isActive": false, "active": false, "mode": null})
            );
            assert_eq!(
                reply(&mut session, &doc, r#"{"action":"startValidate","language":"python"}"#),
                serde_json::json!({"success": true, "active": true, "mode": "validate"})
            );
            assert_eq!(session.config().syntax, Syntax::Python);
            assert_eq!(
                reply(&mut session, &doc, r#"{"action":"stop"}"#),
                serde_json::json!({"success": true})
            );
            assert!(!session.is_active());
            assert_eq!(session.mode(), None);
        }

        #[test]
        fn test_activate_reports_generate_mode() {
            let doc = Document::parse(PAGE);
            let mut session = Session::default();
            reply(&mut session, &doc, r#"{"action":"activate"}"#);
            assert_eq!(
                reply(&mut session, &doc, r#"{"action":"getStatus"}"#)["mode"],
                serde_json::json!("generate")
            );
        }

        #[test]
        fn test_validate_locator() {
            let doc = Document::parse(PAGE);
            let mut session = Session::default();
            let value = reply(
                &mut session,
                &doc,
                r#"{"action":"validateLocator","code":"page.getByLabel(\"Username\")"}"#,
            );
            assert_eq!(value["success"], serde_json::json!(true));
            assert_eq!(value["count"], serde_json::json!(1));
            assert_eq!(value["isUnique"], serde_json::json!(true));
        }

        #[test]
        fn test_validate_locator_error() {
            let doc = Document::parse(PAGE);
            let mut session = Session::default();
            let value = reply(&mut session, &doc, r#"{"action":"validateLocator","code":"??"}"#);
            assert_eq!(
                value,
                serde_json::json!({"success": false, "error": "Invalid Java syntax"})
            );
        }

        #[test]
        fn test_generate_uses_session_syntax() {
            let doc = Document::parse(PAGE);
            let mut session = Session::new(InspectorConfig::default());
            reply(&mut session, &doc, r#"{"action":"startGenerate","language":"csharp"}"#);
            let value = reply(&mut session, &doc, r#"{"action":"generate","selector":"button"}"#);
            assert_eq!(value["element"]["tagName"], serde_json::json!("BUTTON"));
            assert_eq!(
                value["strategies"][0]["code"],
                serde_json::json!(r#"page.GetByRole(AriaRole.Button, new() { Name = "Login" })"#)
            );
            assert_eq!(value["history"]["type"], serde_json::json!("role"));
            assert!(!session.is_active());
        }

        #[test]
        fn test_generate_missing_target() {
            let doc = Document::parse(PAGE);
            let mut session = Session::default();
            let response = session.handle(
                &doc,
                Request::Generate {
                    selector: "table".into(),
                },
            );
            assert!(!response.is_success());
        }
    }
}
