//! `signup` entry-point: fills in the registration form from flags and
//! prompts, then creates the account through the configured service.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use signup::SignupSettings;
use signup::domain::ports::{AccountCreationClient, FixtureAccountCreationClient};
use signup::domain::{
    FailureKind, FieldName, FocusChain, FormController, MessageCatalogue, RegistrationInput,
    SubmissionOutcome,
};
use signup::inbound::cli::{
    DialoguerPrompt, FieldPrompt, TerminalSignals, fill_fields, render_field_errors,
};
use signup::outbound::http::HttpAccountCreationClient;

/// `signup` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "signup",
    about = "Register a new account with the account service",
    version
)]
struct CliArgs {
    /// Display name. Prompted for when omitted.
    #[arg(long, value_name = "name")]
    name: Option<String>,
    /// E-mail address. Prompted for when omitted.
    #[arg(long, value_name = "address")]
    email: Option<String>,
    /// Password. Prompted for when omitted.
    #[arg(long, value_name = "password")]
    password: Option<String>,
    /// Submissions allowed before giving up on invalid input.
    #[arg(
        long = "max-attempts",
        value_name = "count",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_attempts: u32,
    /// Accept the account locally without contacting the service.
    #[arg(long = "dry-run")]
    dry_run: bool,
}

impl CliArgs {
    /// Form values supplied on the command line, plus the fields still missing.
    fn initial_input(&self) -> (RegistrationInput, Vec<FieldName>) {
        let mut input = RegistrationInput::default();
        let mut missing = Vec::new();
        for (field, value) in [
            (FieldName::Name, &self.name),
            (FieldName::Email, &self.email),
            (FieldName::Password, &self.password),
        ] {
            match value {
                Some(value) => input = input.with_value(field, value.as_str()),
                None => missing.push(field),
            }
        }
        (input, missing)
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build signup runtime")?;
    runtime.block_on(async_main(args))
}

async fn async_main(args: CliArgs) -> Result<ExitCode> {
    let settings = SignupSettings::load_from_iter([OsString::from("signup")])
        .map_err(|error| eyre!("failed to load signup settings: {error}"))?;

    if args.dry_run {
        info!("dry run; account service will not be contacted");
        return drive(Arc::new(FixtureAccountCreationClient), &settings, &args).await;
    }

    let endpoint = settings.endpoint()?;
    let client = HttpAccountCreationClient::new(
        endpoint,
        settings.request_timeout(),
        settings.user_agent(),
    )
    .wrap_err("failed to build account service client")?;
    drive(Arc::new(client), &settings, &args).await
}

async fn drive<C: AccountCreationClient>(
    client: Arc<C>,
    settings: &SignupSettings,
    args: &CliArgs,
) -> Result<ExitCode> {
    let signals = Arc::new(TerminalSignals::new(io::stdout()));
    let mut controller = FormController::new(client, Arc::clone(&signals))
        .with_feedback(settings.feedback())
        .with_catalogue(settings.catalogue());
    let mut session = FormSession {
        chain: FocusChain::default(),
        prompter: DialoguerPrompt,
        errors_out: io::stdout(),
        max_attempts: args.max_attempts,
    };
    let (input, missing) = args.initial_input();

    session
        .run(&mut controller, &signals, input, &missing)
        .await
}

/// Terminal side of one registration session.
struct FormSession<P, W> {
    chain: FocusChain,
    prompter: P,
    errors_out: W,
    max_attempts: u32,
}

impl<P: FieldPrompt, W: Write> FormSession<P, W> {
    /// Prompt for `missing` fields and submit, re-prompting only the errored
    /// fields after each validation failure.
    ///
    /// The session succeeds only once the controller asks to leave the form.
    async fn run<C, M, A>(
        &mut self,
        controller: &mut FormController<C, TerminalSignals<A>, M>,
        signals: &TerminalSignals<A>,
        input: RegistrationInput,
        missing: &[FieldName],
    ) -> Result<ExitCode>
    where
        C: AccountCreationClient,
        M: MessageCatalogue,
        A: Write + Send,
    {
        let mut input = fill_fields(
            &self.chain,
            input,
            |field| missing.contains(&field),
            &mut self.prompter,
        )?;

        for attempt in 1..=self.max_attempts {
            let outcome = controller.submit(&input).await?;
            controller.acknowledge();
            let SubmissionOutcome::Failure {
                kind: FailureKind::ValidationFailure,
            } = outcome
            else {
                break;
            };

            let errors = controller.field_errors();
            render_field_errors(&mut self.errors_out, errors)?;
            if attempt < self.max_attempts {
                input = fill_fields(
                    &self.chain,
                    input,
                    |field| errors.contains(field),
                    &mut self.prompter,
                )?;
            }
        }

        if signals.navigated_back() {
            return Ok(ExitCode::SUCCESS);
        }
        warn!("registration form closed without creating an account");
        Ok(ExitCode::FAILURE)
    }
}
