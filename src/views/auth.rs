use super::{Page, layout};

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        r#"<form action="{action}" method="POST">
<p><input type="text" name="username" placeholder="username" required></p>
<p><input type="password" name="password" placeholder="password" required></p>
<p><button type="submit">{submit}</button></p>
</form>"#
    )
}

pub fn register(page: &Page) -> String {
    let content = format!(
        r#"<h1>Sign Up</h1>
{}
<p>Already have an account? <a href="/login">Login</a></p>"#,
        credentials_form("/register", "Sign Up")
    );
    layout(page, "Sign Up", &content)
}

pub fn login(page: &Page) -> String {
    let content = format!(
        r#"<h1>Login</h1>
{}
<p>New here? <a href="/register">Sign up</a></p>"#,
        credentials_form("/login", "Login")
    );
    layout(page, "Login", &content)
}
