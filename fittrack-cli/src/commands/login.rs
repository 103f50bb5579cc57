use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};

use super::{show_error, show_success, Context};
use crate::flows::{self, LoginForm, LoginOutcome};

#[derive(Args)]
pub struct LoginCommand {
    /// Account email (prompted when omitted)
    #[arg(long)]
    email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "FITTRACK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        println!("FitTrack - Login");
        println!();

        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };

        let password = match self.password {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };

        submit_login(ctx, LoginForm { email, password }).await
    }
}

pub(crate) async fn submit_login(ctx: &Context, form: LoginForm) -> Result<()> {
    println!();
    println!("Logging in as {}...", form.email);

    match flows::login(&ctx.client, &form).await {
        Ok(LoginOutcome::SignedIn) => {
            show_success("Login successful!");
            println!();
            println!("Run 'fittrack dashboard' to open your dashboard.");
            Ok(())
        }
        Ok(LoginOutcome::NoToken) => {
            println!("The server accepted the request but issued no session.");
            Ok(())
        }
        Err(e) => {
            show_error(&e.to_string());
            Err(e)
        }
    }
}
