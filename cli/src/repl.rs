//! Interactive loop: pick a form, fill its fields, submit, print, repeat until
//! EOF or quit. Used when `-i/--interactive` is passed.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use cli::{print_outcome, FormDef, FormsFile, SubmitBackend};

/// Runs the REPL: list forms, prompt for one, prompt for its fields, submit.
///
/// Exits on EOF (Ctrl+D) or `quit`/`exit`/`/quit`. On backend error, prints to
/// stderr and continues.
pub async fn run_repl_loop(
    backend: &Arc<dyn SubmitBackend>,
    forms: &FormsFile,
    html: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    print_forms(forms);
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("forme> ");
        std::io::stdout().flush()?;

        let line = match reader.next_line().await? {
            None => break,
            Some(s) => s.trim().to_string(),
        };
        if line.is_empty() {
            continue;
        }
        if is_quit_command(&line) {
            break;
        }

        let Some(form) = resolve_form(forms, &line) else {
            eprintln!("forme inconnue: {line}");
            continue;
        };

        let Some(fields) = prompt_fields(&mut reader, form).await? else {
            break; // EOF mid-form
        };

        match backend.submit(&form.agent, &fields).await {
            Ok(outcome) => print_outcome(&outcome, html, json),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    println!("Au revoir.");
    Ok(())
}

fn print_forms(forms: &FormsFile) {
    println!("Formulaires disponibles :");
    for (i, form) in forms.forms.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, form.title(), form.agent);
    }
}

/// Accepts a 1-based index or an agent identifier.
fn resolve_form<'a>(forms: &'a FormsFile, input: &str) -> Option<&'a FormDef> {
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| forms.forms.get(i));
    }
    forms.get(input)
}

/// Prompts for every field of the form, in definition order. Required fields
/// re-prompt on blank input; optional blanks are submitted as empty strings,
/// like an untouched input field. Returns `None` on EOF.
async fn prompt_fields(
    reader: &mut Lines<BufReader<Stdin>>,
    form: &FormDef,
) -> Result<Option<Vec<(String, String)>>, std::io::Error> {
    let mut fields = Vec::with_capacity(form.fields.len());
    for field in &form.fields {
        loop {
            if field.required {
                print!("{} (requis): ", field.label());
            } else {
                print!("{}: ", field.label());
            }
            std::io::stdout().flush()?;

            let Some(line) = reader.next_line().await? else {
                return Ok(None);
            };
            let value = line.trim().to_string();
            if value.is_empty() && field.required {
                continue;
            }
            fields.push((field.name.clone(), value));
            break;
        }
    }
    Ok(Some(fields))
}

fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cli::BackendError;
    use guichet::SubmissionOutcome;
    use std::sync::Mutex;

    struct DummyBackend {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SubmitBackend for DummyBackend {
        async fn submit(
            &self,
            agent: &str,
            _fields: &[(String, String)],
        ) -> Result<SubmissionOutcome, BackendError> {
            self.seen.lock().unwrap().push(agent.to_string());
            Ok(SubmissionOutcome::Success {
                output: Some("ok".to_string()),
            })
        }
    }

    #[test]
    fn is_quit_command_matches_expected_tokens() {
        assert!(is_quit_command("quit"));
        assert!(is_quit_command(" EXIT "));
        assert!(is_quit_command("/quit"));
        assert!(!is_quit_command("planner"));
    }

    #[test]
    fn resolve_form_accepts_index_and_agent_name() {
        let forms = cli::forms::load_default().unwrap();
        assert_eq!(resolve_form(&forms, "1").unwrap().agent, "planner");
        assert_eq!(resolve_form(&forms, "writer").unwrap().agent, "writer");
        assert!(resolve_form(&forms, "0").is_none());
        assert!(resolve_form(&forms, "99").is_none());
        assert!(resolve_form(&forms, "unknown").is_none());
    }

    #[tokio::test]
    async fn backend_receives_the_resolved_agent() {
        let backend = DummyBackend {
            seen: Mutex::new(Vec::new()),
        };
        let outcome = backend
            .submit("planner", &[("objective".to_string(), "x".to_string())])
            .await
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(backend.seen.lock().unwrap().as_slice(), ["planner"]);
    }
}
