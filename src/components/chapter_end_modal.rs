// src/components/chapter_end_modal.rs
use crate::utils;
use web_sys::HtmlElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChapterEndModalProps {
    pub next_url: AttrValue,
    pub on_stay: Callback<()>,
}

/// Shown on the last page when a next chapter exists. Never advances on its
/// own: the reader either stays or opens the next chapter.
#[function_component(ChapterEndModal)]
pub fn chapter_end_modal(props: &ChapterEndModalProps) -> Html {
    let next_ref = use_node_ref();

    {
        let next_ref = next_ref.clone();
        use_effect_with((), move |_| {
            if let Some(button) = next_ref.cast::<HtmlElement>() {
                let _ = button.focus();
            }
            || ()
        });
    }

    let on_stay = {
        let on_stay = props.on_stay.clone();
        Callback::from(move |_: MouseEvent| on_stay.emit(()))
    };
    let on_next = {
        let url = props.next_url.clone();
        Callback::from(move |_: MouseEvent| utils::navigate(&url))
    };

    html! {
        <div class="mask_panel" id="transit_div" style="position:fixed; inset:0; background:rgba(0,0,0,0.4);">
            <div class="pop_grade">
                <div class="pop_bbsadmin" id="internal_div" style="margin:150px auto 0;">
                    <div class="pop_bbsadmin_top">{"提示信息"}</div>
                    <div class="pop_bbsadmin_mend">
                        <div class="pop_bbsadmin_choice2">
                            <strong class="pop_grade_clew-icon"></strong>
                            <span style="color:#F3742F;">{"本章节已经浏览完毕，您可以："}</span>
                        </div>
                        <div style="text-align:center">
                            <input type="button" value="留在本页" style="margin-right:20px;"
                                id="close_btn" class="part_collection_bnt" onclick={on_stay} />
                            <input type="button" value="浏览下一章节" style="margin-right:20px;"
                                id="next_btn" class="part_collection_bnt" onclick={on_next}
                                ref={next_ref} />
                        </div>
                    </div>
                    <div class="pop_bbsadmin_foot"></div>
                </div>
            </div>
        </div>
    }
}
