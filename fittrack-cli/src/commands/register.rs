use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};
use std::io::IsTerminal;

use super::login::submit_login;
use super::{show_error, show_success, Context};
use crate::flows::{self, LoginForm, RegisterForm, RegisterOutcome};

#[derive(Args)]
pub struct RegisterCommand {
    /// Account email (prompted when omitted)
    #[arg(long)]
    email: Option<String>,

    /// Display name (prompted when omitted)
    #[arg(long)]
    username: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl RegisterCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        println!("FitTrack - Create account");
        println!();

        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };

        let username = match self.username {
            Some(username) => username,
            None => Input::new().with_prompt("Username").interact_text()?,
        };

        let password = match self.password {
            Some(password) => password,
            None => Password::new()
                .with_prompt("Password")
                .with_confirmation("Repeat password", "Passwords do not match")
                .interact()?,
        };

        let form = RegisterForm {
            email,
            password,
            username,
        };

        match flows::register(&ctx.client, &form).await {
            Ok(RegisterOutcome::SignedIn) => {
                show_success(&format!("Welcome, {}!", form.username));
                println!();
                println!("Run 'fittrack dashboard' to open your dashboard.");
                Ok(())
            }
            Ok(RegisterOutcome::LoginRequired) => {
                show_success("Registration successful! Please log in.");

                if !std::io::stdin().is_terminal() {
                    println!("Use 'fittrack login --email {}' to continue.", form.email);
                    return Ok(());
                }

                // Switch over to the login prompt with the email filled in
                println!();
                let password = Password::new().with_prompt("Password").interact()?;
                submit_login(
                    ctx,
                    LoginForm {
                        email: form.email,
                        password,
                    },
                )
                .await
            }
            Err(e) => {
                show_error(&e.to_string());
                Err(e)
            }
        }
    }
}
