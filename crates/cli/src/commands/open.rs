// Route guard from the command line

use anyhow::Result;
use campus_portal_core::routes::navigation;
use campus_portal_core::Navigation;
use serde::Serialize;

use super::App;
use crate::output::{print_table_header, print_table_row};

#[derive(Serialize)]
struct Outcome<'a> {
    outcome: &'static str,
    location: &'a str,
}

pub fn run(app: &App, path: &str) -> Result<()> {
    let session = app.context.session();
    let navigation_result = app.router.open(&session, path);
    let (outcome, location) = match &navigation_result {
        Navigation::Render(p) => ("render", p.as_str()),
        Navigation::Redirect(p) => ("redirect", p.as_str()),
        Navigation::NotFound(p) => ("not-found", p.as_str()),
    };

    if !app.output.is_text() {
        return app.output.print_value(&Outcome { outcome, location });
    }

    println!("{} {}", outcome, location);

    if app.quiet {
        return Ok(());
    }
    if let (Navigation::Render(_), Some(identity)) = (&navigation_result, session.identity()) {
        println!();
        print_table_header(&[("PAGE", 12), ("PATH", 24)]);
        for item in navigation(identity.role) {
            print_table_row(&[(item.label, 12), (item.href, 24)]);
        }
    }
    Ok(())
}
