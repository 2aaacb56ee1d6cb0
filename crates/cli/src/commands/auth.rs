// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `flowml auth` - Local user account management
//!
//! Accounts live in plain JSON under the state directory. This is a
//! local convenience, not a security boundary.

use crate::context;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create an account and log in
    Register {
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Log in to an existing account
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out of the current account
    Logout,
    /// Show the logged-in user
    Whoami,
}

pub fn handle(args: AuthArgs) -> Result<()> {
    let store = context::credentials()?;
    match args.command {
        AuthCommand::Register {
            email,
            name,
            password,
        } => {
            let user = store.register(&email, &password, &name)?;
            println!("Registered and logged in as {} <{}>", user.name, user.email);
        }
        AuthCommand::Login { email, password } => {
            let user = store.login(&email, &password)?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        AuthCommand::Logout => {
            store.logout()?;
            println!("Logged out.");
        }
        AuthCommand::Whoami => match store.current_user()? {
            Some(user) => {
                println!("{} <{}>", user.name, user.email);
                println!("Member since {}", user.created_at.format("%Y-%m-%d"));
            }
            None => println!("Not logged in."),
        },
    }
    Ok(())
}
