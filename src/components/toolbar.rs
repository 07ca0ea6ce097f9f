// src/components/toolbar.rs
use crate::navigation::ReadingMode;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub mode: ReadingMode,
    pub fit_width: bool,
    pub grayscale: bool,
    pub on_switch_mode: Callback<()>,
    pub on_toggle_fit: Callback<()>,
    pub on_toggle_filter: Callback<()>,
}

pub fn switch_label(mode: ReadingMode) -> &'static str {
    match mode {
        ReadingMode::Continuous => "切换到上下滚动阅读",
        ReadingMode::Paginated => "切换到左右翻页阅读",
    }
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="display_graybg funcdiv"
            style="margin:0 auto; width:980px; height:30px; line-height:30px; border-bottom:1px #ccc solid;">
            <span class="red1_font12" style="float:left">{"\u{a0}功能选项："}</span>
            <a class="red1_font12" id="qiehuan_txt" style="float:left; margin-right:15px; cursor:pointer"
                onclick={emit(&props.on_switch_mode)}>
                { switch_label(props.mode) }
            </a>
            <span style="font-size:14px; padding-left:5px; float:left"
                title="开启此功能后，超出浏览器宽度的图片将自动适应到浏览器宽度">
                <input type="checkbox" class="zoompic_chk" id="zoompic_chk1"
                    style="float:left; margin:9px 5px 0 5px"
                    checked={props.fit_width} onclick={emit(&props.on_toggle_fit)} />
                <label class="zoompic_label" style="cursor:pointer;" for="zoompic_chk1">{"大图自动缩小"}</label>
            </span>
            <span style="font-size:13px;" title="开启后彩色图片将过滤成黑白">
                <input type="checkbox" class="filter_chk" id="filter_chk"
                    style="float:left; margin:9px 5px 0 5px"
                    checked={props.grayscale} onclick={emit(&props.on_toggle_filter)} />
                <label class="filter_chk" style="cursor:pointer; float:left" for="filter_chk">{"黑白滤镜"}</label>
            </span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_label_names_other_mode() {
        assert_eq!(switch_label(ReadingMode::Continuous), "切换到上下滚动阅读");
        assert_eq!(switch_label(ReadingMode::Paginated), "切换到左右翻页阅读");
    }
}
