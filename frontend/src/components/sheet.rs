use uuid::Uuid;
use yew::{classes, html, Component, Context, Html, Properties};

/// Modal panel sliding down from the top. Visibility follows `open`; the
/// parent owns that flag.
pub struct Sheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub open: bool,
    #[prop_or_default]
    pub title: String,
}

impl Component for Sheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class={classes!("sheet-backdrop", props.open.then_some("show"))}>
                <div class="top-sheet" id={self.id.clone()} role="dialog">
                    if !props.title.is_empty() {
                        <h3>{ props.title.clone() }</h3>
                    }
                    { props.children.clone() }
                </div>
            </div>
        }
    }
}
