use closetr::domain::account::SessionToken;
use closetr::domain::config::RegisterConfig;
use closetr::domain::route::Route;
use closetr::features::register::RegisterForm;
use closetr::features::register::memory::{MemoryDirectory, MemorySessions, RecordingNavigator};
use closetr_shell::{Exit, Shell};

type MemoryShell = Shell<MemorySessions, MemoryDirectory, RecordingNavigator>;

fn shell(sessions: MemorySessions, directory: MemoryDirectory) -> (MemoryShell, RecordingNavigator) {
    let navigator = RecordingNavigator::new();
    let form = RegisterForm::new(sessions, directory, navigator.clone(), &RegisterConfig::default());
    (Shell::new(form), navigator)
}

async fn run(shell: &mut MemoryShell, script: &str) -> (Exit, String) {
    let mut output = Vec::new();
    let exit = shell.run(script.as_bytes(), &mut output).await.unwrap();
    (exit, String::from_utf8(output).unwrap())
}

#[tokio::test]
async fn signed_in_user_never_sees_the_form() {
    let sessions = MemorySessions::signed_in(SessionToken::new("fides"));
    let (mut shell, navigator) = shell(sessions, MemoryDirectory::new());

    let (exit, output) = run(&mut shell, "set name Fides\n").await;

    assert_eq!(exit, Exit::Navigated);
    assert!(output.starts_with("Already signed in; continuing to /dashboard"));
    assert!(!output.contains("Name"));
    assert_eq!(navigator.visited(), vec![Route::Dashboard]);
}

#[tokio::test]
async fn registration_walkthrough() {
    let sessions = MemorySessions::new();
    let directory = MemoryDirectory::new().with_taken(["fides"]).with_sessions(sessions.clone());
    let (mut shell, navigator) = shell(sessions.clone(), directory.clone());

    let script = "\
set username fides
set name Fides Wechsler
set password secret
set confirm secret
submit
set username fides.w
submit
show
";
    let (exit, output) = run(&mut shell, script).await;

    assert_eq!(exit, Exit::Navigated);
    assert!(output.contains("Name              []  ! required"));
    assert!(output.contains("! this username is already taken"));
    assert!(output.ends_with("Account created; continuing to /dashboard\n"));
    assert!(directory.contains("fides.w"));
    assert!(sessions.current().is_some());
    assert_eq!(navigator.visited(), vec![Route::Dashboard]);
}

#[tokio::test]
async fn premature_submit_is_refused() {
    let (mut shell, navigator) = shell(MemorySessions::new(), MemoryDirectory::new());

    let (exit, output) = run(&mut shell, "set name Fides\nsubmit\nquit\n").await;

    assert_eq!(exit, Exit::Quit);
    assert!(output.contains("Cannot register yet"));
    assert!(navigator.visited().is_empty());
    assert!(!shell.form().is_active());
}

#[tokio::test]
async fn bad_lines_are_reported_and_skipped() {
    let (mut shell, _) = shell(MemorySessions::new(), MemoryDirectory::new());

    let (exit, output) = run(&mut shell, "dance\nset email x\nhelp\n").await;

    assert_eq!(exit, Exit::Quit);
    assert!(output.contains("unknown command 'dance'"));
    assert!(output.contains("unknown field 'email'"));
    assert!(output.contains("set <field> <value>"));
}

#[tokio::test]
async fn login_leaves_the_form() {
    let (mut shell, navigator) = shell(MemorySessions::new(), MemoryDirectory::new());

    let (exit, output) = run(&mut shell, "set name Fides\nlogin\nset username ignored\n").await;

    assert_eq!(exit, Exit::Navigated);
    assert!(output.ends_with("Continuing to /login\n"));
    assert_eq!(navigator.visited(), vec![Route::Login]);
    assert_eq!(shell.form().view().field(closetr::features::register::FieldId::Username).value, "");
}

#[test]
fn register_slice_is_compiled_in() {
    assert!(closetr::features::is_enabled("register"));
    assert_eq!(closetr::features::ENABLED, ["register"]);
}
