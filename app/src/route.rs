use dioxus::prelude::*;

use crate::components::Layout;
use crate::pages::{Arcade, Dashboard, Invite, Marketplace, Welcome};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Welcome {},
    #[route("/invitation")]
    Invite {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/marketplace")]
    Marketplace {},
    #[route("/arcade")]
    Arcade {},
}
