//! End-to-end tests that drive the menu against a mock completion endpoint.

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use delulu::chat::{ChatConfig, Input, Menu, Renderer};
    use delulu::{CredentialStore, Message, Model, OpenAi, Result};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Script {
        lines: VecDeque<&'static str>,
        secrets: VecDeque<&'static str>,
    }

    impl Script {
        fn new(lines: &[&'static str], secrets: &[&'static str]) -> Self {
            Self {
                lines: lines.iter().copied().collect(),
                secrets: secrets.iter().copied().collect(),
            }
        }
    }

    impl Input for Script {
        fn read_line(&mut self, _: &str) -> Result<Option<String>> {
            Ok(self.lines.pop_front().map(String::from))
        }

        fn read_secret(&mut self, _: &str) -> Result<Option<String>> {
            Ok(self.secrets.pop_front().map(String::from))
        }
    }

    #[derive(Default)]
    struct Transcript {
        replies: Vec<String>,
        errors: Vec<String>,
        infos: Vec<String>,
        history: Vec<Vec<Message>>,
    }

    impl Renderer for Transcript {
        fn clear_screen(&mut self) {}
        fn print_banner(&mut self, _: bool) {}
        fn print_menu(&mut self) {}
        fn print_chat_intro(&mut self) {}

        fn print_reply(&mut self, text: &str) {
            self.replies.push(text.to_string());
        }

        fn print_history(&mut self, messages: &[Message]) {
            self.history.push(messages.to_vec());
        }

        fn print_help(&mut self, _: &str) {}
        fn print_about(&mut self, _: &str) {}
        fn start_thinking(&mut self) {}
        fn finish_thinking(&mut self) {}

        fn print_error(&mut self, error: &str) {
            self.errors.push(error.to_string());
        }

        fn print_info(&mut self, info: &str) {
            self.infos.push(info.to_string());
        }
    }

    fn client_for(server: &MockServer) -> OpenAi {
        OpenAi::with_options(
            Some(format!("{}/v1", server.uri())),
            Some(Model::from("gpt-4o-mini")),
            Some(Duration::from_secs(5)),
        )
        .unwrap()
    }

    fn config_in(dir: &std::path::Path) -> ChatConfig {
        ChatConfig::new()
            .with_credential_path(dir.join(".delulu_config"))
            .with_transcript_dir(dir)
    }

    #[tokio::test]
    async fn store_key_chat_and_save() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "You are Delulu Bot."},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "model": "gpt-4o-mini",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "hi there"},
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let menu = Menu::new(client_for(&server), config_in(dir.path()));
        let mut input = Script::new(
            &["2", "", "1", "hello", "/history", "/save", "/exit", "4"],
            &["sk-test"],
        );
        let mut renderer = Transcript::default();

        menu.run(&mut input, &mut renderer).await.unwrap();

        assert!(renderer.errors.is_empty(), "{:?}", renderer.errors);
        assert_eq!(renderer.replies, vec!["hi there"]);
        assert_eq!(
            CredentialStore::new(dir.path().join(".delulu_config"))
                .load()
                .unwrap(),
            Some("sk-test".to_string())
        );

        let visible: Vec<_> = renderer.history[0]
            .iter()
            .filter(|m| !m.is_system())
            .cloned()
            .collect();
        assert_eq!(
            visible,
            vec![Message::user("hello"), Message::assistant("hi there")]
        );

        assert_eq!(renderer.infos[0], "API Key saved.");
        let saved = renderer.infos[1].strip_prefix("Saved as ").unwrap();
        assert_eq!(
            std::fs::read_to_string(saved).unwrap(),
            "You: hello\nDelulu: hi there\n"
        );
    }

    #[tokio::test]
    async fn rejected_key_keeps_chatting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".delulu_config"), "sk-wrong").unwrap();
        let menu = Menu::new(client_for(&server), config_in(dir.path()));
        let mut input = Script::new(&["1", "hello", "again", "/history", "/exit", "4"], &[]);
        let mut renderer = Transcript::default();

        menu.run(&mut input, &mut renderer).await.unwrap();

        assert_eq!(
            renderer.errors,
            vec![
                "Authentication failed. Please verify your API key.",
                "Authentication failed. Please verify your API key.",
            ]
        );
        assert!(renderer.replies.is_empty());
        assert!(renderer.history[0].iter().all(Message::is_system));
    }

    #[tokio::test]
    async fn chat_needs_a_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let menu = Menu::new(client_for(&server), config_in(dir.path()));
        let mut input = Script::new(&["1", "", "4"], &[]);
        let mut renderer = Transcript::default();

        menu.run(&mut input, &mut renderer).await.unwrap();

        assert_eq!(renderer.errors, vec!["API key not configured."]);
    }
}
