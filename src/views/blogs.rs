use mongodb::bson::oid::ObjectId;

use crate::blog::model::{Blog, PopulatedBlog};
use crate::middleware::auth::{Owned, is_owned_by};
use crate::utils::sanitize::excerpt;

use super::{Page, escape, layout};

/// Whether the signed-in viewer owns `resource` and gets edit/delete controls.
fn is_viewer<R: Owned<Id = ObjectId>>(page: &Page, resource: &R) -> bool {
    page.user.is_some_and(|user| is_owned_by(resource, &user.id))
}

pub fn index(page: &Page, blogs: &[Blog]) -> String {
    let mut content = String::from("<h1>All Posts</h1>\n");
    if blogs.is_empty() {
        content.push_str("<p>No posts yet.</p>\n");
    }
    for blog in blogs {
        content.push_str(&format!(
            r#"<article>
<h2><a href="/blogs/{id}">{title}</a></h2>
<img src="{image}" alt="">
<p><small>{created} by {author}</small></p>
<p>{excerpt}</p>
<p><a href="/blogs/{id}">Read more</a></p>
</article>
"#,
            id = blog.id.to_hex(),
            title = escape(&blog.title),
            image = escape(&blog.image),
            created = blog.created.format("%B %e, %Y"),
            author = escape(&blog.author.username),
            excerpt = escape(&excerpt(&blog.body, 100)),
        ));
    }
    layout(page, "All Posts", &content)
}

fn blog_fields(blog: Option<&Blog>) -> String {
    let (title, image, body) = blog
        .map(|b| (escape(&b.title), escape(&b.image), escape(&b.body)))
        .unwrap_or_default();
    format!(
        r#"<p><label>Title <input type="text" name="blog[title]" value="{title}"></label></p>
<p><label>Image URL <input type="text" name="blog[image]" value="{image}"></label></p>
<p><label>Body <textarea name="blog[body]" rows="10">{body}</textarea></label></p>"#
    )
}

pub fn new_form(page: &Page) -> String {
    let content = format!(
        r#"<h1>New Post</h1>
<form action="/blogs" method="POST">
{}
<p><button type="submit">Publish</button></p>
</form>"#,
        blog_fields(None)
    );
    layout(page, "New Post", &content)
}

pub fn edit_form(page: &Page, blog: &Blog) -> String {
    let content = format!(
        r#"<h1>Edit {title}</h1>
<form action="/blogs/{id}?_method=PUT" method="POST">
{fields}
<p><button type="submit">Save</button></p>
</form>"#,
        title = escape(&blog.title),
        id = blog.id.to_hex(),
        fields = blog_fields(Some(blog)),
    );
    layout(page, "Edit Post", &content)
}

pub fn show(page: &Page, populated: &PopulatedBlog) -> String {
    let blog = &populated.blog;
    let id = blog.id.to_hex();

    let owner_controls = if is_viewer(page, blog) {
        format!(
            r#"<p><a href="/blogs/{id}/edit">Edit</a>
<form class="inline" action="/blogs/{id}?_method=DELETE" method="POST"><button type="submit">Delete</button></form></p>"#
        )
    } else {
        String::new()
    };

    let mut comments = String::new();
    for comment in &populated.comments {
        let controls = if is_viewer(page, comment) {
            format!(
                r#" <a href="/blogs/{id}/comments/{cid}/edit">Edit</a>
<form class="inline" action="/blogs/{id}/comments/{cid}?_method=DELETE" method="POST"><button type="submit">Delete</button></form>"#,
                cid = comment.id.to_hex()
            )
        } else {
            String::new()
        };
        comments.push_str(&format!(
            "<li><strong>{}</strong> <small>{}</small><p>{}</p>{}</li>\n",
            escape(&comment.author.username),
            comment.created.format("%B %e, %Y"),
            escape(&comment.text),
            controls,
        ));
    }

    // The body was sanitized on the way in and is rendered as markup.
    let content = format!(
        r#"<article>
<h1>{title}</h1>
<img src="{image}" alt="">
<p><small>{created} by {author}</small></p>
<div class="body">{body}</div>
{owner_controls}
</article>
<section>
<h2>Comments</h2>
<p><a href="/blogs/{id}/comments/new">Add a comment</a></p>
<ul>
{comments}</ul>
</section>"#,
        title = escape(&blog.title),
        image = escape(&blog.image),
        created = blog.created.format("%B %e, %Y"),
        author = escape(&blog.author.username),
        body = blog.body,
    );
    layout(page, &blog.title, &content)
}
