//! Server-side HTML rendering with Tera.
//!
//! Templates are compiled into the binary so the server has no runtime
//! dependency on the working directory.

use tera::{Context, Tera};

use service::auth::domain::AuthUser;
use service::place::Place;

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("wishlist.html", include_str!("../templates/wishlist.html")),
            ("visited.html", include_str!("../templates/visited.html")),
            ("place_details.html", include_str!("../templates/place_details.html")),
            ("login.html", include_str!("../templates/login.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Wishlist page; `name` refills the add form after a rejected submit.
    pub fn wishlist(&self, user: &AuthUser, places: &[Place], name: &str, errors: &[String]) -> Result<String, tera::Error> {
        let mut ctx = page(Some(user), errors);
        ctx.insert("places", places);
        ctx.insert("name", name);
        self.tera.render("wishlist.html", &ctx)
    }

    pub fn visited(&self, user: &AuthUser, places: &[Place]) -> Result<String, tera::Error> {
        let mut ctx = page(Some(user), &[]);
        ctx.insert("places", places);
        self.tera.render("visited.html", &ctx)
    }

    pub fn details(&self, user: &AuthUser, place: &Place, flash: Option<&str>, errors: &[String]) -> Result<String, tera::Error> {
        let mut ctx = page(Some(user), errors);
        ctx.insert("place", place);
        ctx.insert("flash", &flash);
        self.tera.render("place_details.html", &ctx)
    }

    pub fn login(&self, login_username: &str, register_username: &str, errors: &[String]) -> Result<String, tera::Error> {
        let mut ctx = page(None, errors);
        ctx.insert("login_username", login_username);
        ctx.insert("register_username", register_username);
        self.tera.render("login.html", &ctx)
    }
}

fn page(user: Option<&AuthUser>, errors: &[String]) -> Context {
    let mut ctx = Context::new();
    ctx.insert("username", &user.map(|u| u.username.as_str()));
    ctx.insert("errors", errors);
    ctx
}
