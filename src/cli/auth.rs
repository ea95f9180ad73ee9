//! Auth command and interactive token entry

use crate::cli::style::{Stream, Stylize, check, hyperlink_url};
use anstream::{eprintln, println};
use auto_pr::auth::{AuthSource, Credentials, get_github_auth, token_creation_url, verify_github_auth};
use auto_pr::config::web_host;
use auto_pr::error::{Error, Result};
use auto_pr::platform::GitHubService;
use dialoguer::Password;
use url::Url;

/// Resolve a token, asking the user for one if none is configured
///
/// Opens the token-creation page in the browser; if that fails the URL is
/// printed for the user to open.
pub async fn obtain_credentials(api_base: &Url) -> Result<Credentials> {
    match get_github_auth().await {
        Err(Error::MissingToken) => prompt_for_token(&web_host(api_base)),
        other => other,
    }
}

fn prompt_for_token(web_host: &str) -> Result<Credentials> {
    let url = token_creation_url(web_host);

    eprintln!("{}", "GitHub token not found.".warn());
    if open::that(&url).is_ok() {
        println!(
            "If your browser didn't open, visit: {}",
            hyperlink_url(Stream::Stdout, &url)
        );
    } else {
        println!("Open this page: {}", hyperlink_url(Stream::Stdout, &url));
    }
    println!("Create the token with the {} scope.", "repo".emphasis());

    let token = Password::new()
        .with_prompt("Paste your GitHub token here")
        .interact()
        .map_err(|e| Error::Prompt(e.to_string()))?;

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::MissingToken);
    }
    Ok(Credentials::new(token, AuthSource::Interactive))
}

/// Run the auth test command
pub async fn run_auth_test(api_base: &Url) -> Result<()> {
    println!("Testing GitHub authentication against {}...", api_base.as_str().muted());
    let credentials = get_github_auth().await?;
    let service = GitHubService::new(api_base, &credentials)?;
    let session = verify_github_auth(&service, credentials.source).await?;
    println!("{} Authenticated as: {}", check(), session.login.accent());
    println!("Token source: {:?}", session.source);
    Ok(())
}

/// Run the auth setup command (show instructions)
pub fn run_auth_setup(api_base: &Url) {
    let url = token_creation_url(&web_host(api_base));
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!("===========================");
    println!();
    println!("Option 1: Environment variable");
    println!("  Create a token with the 'repo' scope:");
    println!("  {}", hyperlink_url(Stream::Stdout, &url));
    println!("  Then set GITHUB_TOKEN or GH_TOKEN");
    println!();
    println!("Option 2: GitHub CLI");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("For GitHub Enterprise:");
    println!("  Set GH_HOST to your instance hostname, or GITHUB_API_URL to its API root");
}
