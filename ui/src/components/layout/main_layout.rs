use yew::prelude::*;

use super::{Footer, Header};

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub children: Children,
}

#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    html! {
        <div class="min-h-screen flex flex-col bg-neutral-50 text-neutral-900">
            <Header />
            <main class="flex-1">
                {for props.children.iter()}
            </main>
            <Footer />
        </div>
    }
}
