use crate::blog::model::Blog;
use crate::comment::model::Comment;

use super::{Page, escape, layout};

pub fn new_form(page: &Page, blog: &Blog) -> String {
    let content = format!(
        r#"<h1>Add a comment to {title}</h1>
<form action="/blogs/{id}/comments" method="POST">
<p><textarea name="comment[text]" rows="4" required></textarea></p>
<p><button type="submit">Submit</button></p>
</form>
<p><a href="/blogs/{id}">Go back</a></p>"#,
        title = escape(&blog.title),
        id = blog.id.to_hex(),
    );
    layout(page, "New Comment", &content)
}

pub fn edit_form(page: &Page, blog_id: &str, comment: &Comment) -> String {
    let content = format!(
        r#"<h1>Edit comment</h1>
<form action="/blogs/{blog_id}/comments/{id}?_method=PUT" method="POST">
<p><textarea name="comment[text]" rows="4" required>{text}</textarea></p>
<p><button type="submit">Save</button></p>
</form>
<p><a href="/blogs/{blog_id}">Go back</a></p>"#,
        blog_id = escape(blog_id),
        id = comment.id.to_hex(),
        text = escape(&comment.text),
    );
    layout(page, "Edit Comment", &content)
}
