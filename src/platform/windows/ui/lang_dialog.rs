//! Language options window.
//!
//! Two owner-drawn combos backed by the pure [`LangOptionsPage`]
//! controller: the window forwards measure/draw/compare/delete requests to
//! the list model and paints whatever the paint plan describes.

use std::cell::RefCell;

use tracing::warn;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateSolidBrush, DeleteObject, FillRect, GetDC, GetStockObject, GetTextMetricsW, ReleaseDC,
    SelectObject, SetBkMode, SetTextAlign, SetTextColor, TextOutW, BACKGROUND_MODE,
    DEFAULT_GUI_FONT, HBRUSH, TEXTMETRICW, TEXT_ALIGN_OPTIONS, TRANSPARENT, WHITE_BRUSH,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::EnableWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetDlgItem, GetMessageW,
    GetSysColor, LoadCursorW, PostQuitMessage, RegisterClassW, SendMessageW, TranslateMessage,
    COMPAREITEMSTRUCT, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, DELETEITEMSTRUCT, DRAWITEMSTRUCT,
    HMENU, IDC_ARROW, MEASUREITEMSTRUCT, MSG, ShowWindow, SYS_COLOR_INDEX, SW_SHOW,
    WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLOSE, WM_COMMAND, WM_COMPAREITEM, WM_CREATE,
    WM_DELETEITEM, WM_DESTROY, WM_DRAWITEM, WM_HELP, WM_MEASUREITEM, WNDCLASSW, WS_CAPTION,
    WS_CHILD, WS_OVERLAPPED, WS_SYSMENU, WS_TABSTOP, WS_VISIBLE,
};

use super::super::help::HtmlHelpEngine;
use super::super::res::{to_wide, AppContext};
use crate::locale::{item_height, paint_plan, Align, CandidateEntry, PaintRole, Palette, ScanSources};
use crate::model::constants::*;
use crate::model::Options;
use crate::pages::{LangCombo, LangOptionsPage};
use crate::storage::config;
use crate::{rem_accel, Rgb};

// Control IDs
const ID_OK: i32 = 1;
const ID_CANCEL: i32 = 2;
const ID_UILANG: i32 = 101;
const ID_HELPLANG: i32 = 102;
const ID_APPLY: i32 = 103;
const ID_HELP_BTN: i32 = 104;

// ComboBox styles and messages (from winuser.h)
const CBS_DROPDOWNLIST: u32 = 0x0003;
const CBS_SORT: u32 = 0x0100;
const CBS_OWNERDRAWFIXED: u32 = 0x0010;
const CB_ADDSTRING: u32 = 0x0143;
const CB_GETCOUNT: u32 = 0x0146;
const CB_GETCURSEL: u32 = 0x0147;
const CB_SETCURSEL: u32 = 0x014E;
const CB_GETITEMDATA: u32 = 0x0150;
const CB_ERR: isize = -1;
const CBN_SELCHANGE: u32 = 1;

// Owner-draw state bits
const ODS_SELECTED: u32 = 0x0001;

// Text alignment flags
const TA_LEFT: u32 = 0;
const TA_RIGHT: u32 = 2;

// Window layout
const WINDOW_WIDTH: i32 = 360;
const WINDOW_HEIGHT: i32 = 190;
const MARGIN: i32 = 16;
const ROW_HEIGHT: i32 = 44;
const LABEL_WIDTH: i32 = 120;
const COMBO_WIDTH: i32 = 190;
const BUTTON_WIDTH: i32 = 74;

// System color indices resolved into the paint palette
const COLOR_WINDOW: SYS_COLOR_INDEX = SYS_COLOR_INDEX(5);
const COLOR_WINDOWTEXT: SYS_COLOR_INDEX = SYS_COLOR_INDEX(8);
const COLOR_HIGHLIGHT: SYS_COLOR_INDEX = SYS_COLOR_INDEX(13);
const COLOR_HIGHLIGHTTEXT: SYS_COLOR_INDEX = SYS_COLOR_INDEX(14);
const COLOR_GRAYTEXT: SYS_COLOR_INDEX = SYS_COLOR_INDEX(17);

struct DialogState {
    page: LangOptionsPage,
    options: Options,
    ctx: AppContext,
    help: HtmlHelpEngine,
    item_height: i32,
    palette: Palette,
}

thread_local! {
    static DIALOG: RefCell<Option<DialogState>> = const { RefCell::new(None) };
    static DIALOG_HWND: RefCell<Option<HWND>> = const { RefCell::new(None) };
}

fn colorref_to_rgb(clr: COLORREF) -> Rgb {
    let v = clr.0;
    ((v & 0xff) as u8, ((v >> 8) & 0xff) as u8, ((v >> 16) & 0xff) as u8)
}

fn rgb_to_colorref(rgb: Rgb) -> COLORREF {
    COLORREF(rgb.0 as u32 | ((rgb.1 as u32) << 8) | ((rgb.2 as u32) << 16))
}

/// Paint palette built from the current system colors.
fn system_palette() -> Palette {
    let sys = |idx| colorref_to_rgb(unsafe { GetSysColor(idx) });
    Palette {
        window: sys(COLOR_WINDOW),
        highlight: sys(COLOR_HIGHLIGHT),
        window_text: sys(COLOR_WINDOWTEXT),
        highlight_text: sys(COLOR_HIGHLIGHTTEXT),
        dim_text: sys(COLOR_GRAYTEXT),
    }
}

/// Line height of the default GUI font, the basis for item measurement.
fn default_gui_font_height() -> i32 {
    unsafe {
        let dc = GetDC(None);
        let old = SelectObject(dc, GetStockObject(DEFAULT_GUI_FONT));
        let mut tm = TEXTMETRICW::default();
        let _ = GetTextMetricsW(dc, &mut tm);
        SelectObject(dc, old);
        ReleaseDC(None, dc);
        tm.tmHeight
    }
}

/// Open the language options window and run it to completion.
///
/// Returns the option record as committed by the user (unchanged when the
/// window was cancelled or the page failed to initialize).
pub fn open_options_window(ctx: AppContext, help: HtmlHelpEngine, options: Options) -> Options {
    let already_open = DIALOG_HWND.with(|h| h.borrow().is_some());
    if already_open {
        return options;
    }

    let sources = ScanSources::for_exe_dir(&ctx.exe_dir());
    let exe_name = ctx.exe_display_name();

    let mut page = LangOptionsPage::new();
    // A missing option record would cancel the page before any UI shows;
    // here the record always exists, so this only fails in scans.
    if !page.initialize(Some(&options), &sources, &exe_name, &ctx) {
        return options;
    }

    let title = {
        let t = ctx.res_str_fmt(IDS_OPT_TITLE, &[APP_NAME]);
        if t.is_empty() {
            format!("{} Options", APP_NAME)
        } else {
            rem_accel(&t)
        }
    };

    let state = DialogState {
        page,
        options,
        ctx,
        help,
        item_height: item_height(default_gui_font_height()),
        palette: system_palette(),
    };
    DIALOG.with(|d| *d.borrow_mut() = Some(state));

    unsafe {
        let class_name = w!("DeskPinsOptions");
        let hinstance = GetModuleHandleW(None).unwrap_or_default();

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(options_wnd_proc),
            hInstance: hinstance.into(),
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: HBRUSH(GetStockObject(WHITE_BRUSH).0),
            lpszClassName: class_name,
            ..Default::default()
        };
        let _ = RegisterClassW(&wc);

        let title_wide = to_wide(&title);
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            PCWSTR(title_wide.as_ptr()),
            WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            WINDOW_WIDTH,
            WINDOW_HEIGHT,
            None,
            None,
            Some(hinstance.into()),
            None,
        );

        let hwnd = match hwnd {
            Ok(h) => h,
            Err(err) => {
                warn!("failed to create options window: {}", err);
                return DIALOG
                    .with(|d| d.borrow_mut().take())
                    .map(|s| s.options)
                    .expect("dialog state set above");
            }
        };

        DIALOG_HWND.with(|h| *h.borrow_mut() = Some(hwnd));
        let _ = ShowWindow(hwnd, SW_SHOW);

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let still_open = DIALOG_HWND.with(|h| h.borrow().is_some());
            if !still_open {
                break;
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    DIALOG
        .with(|d| d.borrow_mut().take())
        .map(|s| s.options)
        .expect("dialog state set above")
}

fn close_options_window() {
    // Take the HWND first, releasing the borrow before DestroyWindow
    // (WM_DESTROY arrives synchronously).
    let hwnd_to_destroy = DIALOG_HWND.with(|h| h.borrow_mut().take());
    if let Some(hwnd) = hwnd_to_destroy {
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
    }
}

unsafe extern "system" fn options_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            create_controls(hwnd);
            LRESULT(0)
        }

        WM_MEASUREITEM => {
            let mis = &mut *(lparam.0 as *mut MEASUREITEMSTRUCT);
            let height = DIALOG.with(|d| d.borrow().as_ref().map(|s| s.item_height));
            if let Some(height) = height {
                mis.itemHeight = height as u32;
            }
            LRESULT(1)
        }

        WM_DRAWITEM => {
            let dis = &*(lparam.0 as *const DRAWITEMSTRUCT);
            draw_item(dis);
            LRESULT(1)
        }

        WM_COMPAREITEM => {
            let cis = &*(lparam.0 as *const COMPAREITEMSTRUCT);
            LRESULT(compare_items(cis) as isize)
        }

        WM_DELETEITEM => {
            let dis = &*(lparam.0 as *const DELETEITEMSTRUCT);
            release_item(dis);
            LRESULT(1)
        }

        WM_COMMAND => {
            let control_id = (wparam.0 & 0xFFFF) as i32;
            let notification = ((wparam.0 >> 16) & 0xFFFF) as u32;
            handle_command(hwnd, control_id, notification);
            LRESULT(0)
        }

        WM_HELP => {
            DIALOG.with(|d| {
                if let Some(state) = d.borrow_mut().as_mut() {
                    let DialogState { page, help, .. } = state;
                    page.help_requested(help);
                }
            });
            LRESULT(1)
        }

        WM_CLOSE => {
            close_options_window();
            LRESULT(0)
        }

        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

unsafe fn create_controls(hwnd: HWND) {
    let hinstance = GetModuleHandleW(None).unwrap_or_default();

    let (ui_label, help_label) = DIALOG.with(|d| {
        let d = d.borrow();
        let state = d.as_ref().expect("dialog state lives for the window");
        let label = |id: u32, fallback: &str| {
            let s = state.ctx.res_str(id);
            if s.is_empty() {
                fallback.to_string()
            } else {
                s
            }
        };
        (
            label(IDS_UI_LANG_LABEL, "&UI language:"),
            label(IDS_HELP_LANG_LABEL, "&Help language:"),
        )
    });

    let mut y = MARGIN;
    create_label(hwnd, hinstance.into(), MARGIN, y, &ui_label);
    let ui_combo = create_combo(hwnd, hinstance.into(), MARGIN + LABEL_WIDTH, y, ID_UILANG);
    y += ROW_HEIGHT;
    create_label(hwnd, hinstance.into(), MARGIN, y, &help_label);
    let help_combo = create_combo(hwnd, hinstance.into(), MARGIN + LABEL_WIDTH, y, ID_HELPLANG);
    y += ROW_HEIGHT + 6;

    create_button(hwnd, hinstance.into(), MARGIN, y, "Help", ID_HELP_BTN);
    let mut x = WINDOW_WIDTH - (BUTTON_WIDTH + 8) * 3 - MARGIN;
    create_button(hwnd, hinstance.into(), x, y, "OK", ID_OK);
    x += BUTTON_WIDTH + 8;
    create_button(hwnd, hinstance.into(), x, y, "Cancel", ID_CANCEL);
    x += BUTTON_WIDTH + 8;
    let apply_btn = create_button(hwnd, hinstance.into(), x, y, "&Apply", ID_APPLY);
    let _ = EnableWindow(apply_btn, false);

    // Copy the fill data out before touching the combos: CB_ADDSTRING on a
    // sorted owner-draw combo sends WM_COMPAREITEM back synchronously, and
    // that handler needs to borrow the dialog state itself.
    let (ui_slots, ui_sel, help_slots, help_sel) = DIALOG.with(|d| {
        let d = d.borrow();
        let state = d.as_ref().expect("dialog state lives for the window");
        let slots = |list: &crate::locale::LangList| -> Vec<usize> {
            list.iter_ordered().map(|(slot, _)| slot).collect()
        };
        (
            slots(state.page.ui_langs()),
            state.page.ui_langs().selection(),
            slots(state.page.help_langs()),
            state.page.help_langs().selection(),
        )
    });
    fill_combo(ui_combo, &ui_slots, ui_sel);
    fill_combo(help_combo, &help_slots, help_sel);
}

unsafe fn create_label(
    hwnd: HWND,
    hinstance: windows::Win32::Foundation::HINSTANCE,
    x: i32,
    y: i32,
    text: &str,
) {
    let text_wide = to_wide(text);
    let _ = CreateWindowExW(
        WINDOW_EX_STYLE::default(),
        w!("STATIC"),
        PCWSTR(text_wide.as_ptr()),
        WS_CHILD | WS_VISIBLE,
        x,
        y + 4,
        LABEL_WIDTH,
        20,
        Some(hwnd),
        None,
        Some(hinstance),
        None,
    );
}

unsafe fn create_combo(
    hwnd: HWND,
    hinstance: windows::Win32::Foundation::HINSTANCE,
    x: i32,
    y: i32,
    id: i32,
) -> HWND {
    CreateWindowExW(
        WINDOW_EX_STYLE::default(),
        w!("COMBOBOX"),
        None,
        WS_CHILD
            | WS_VISIBLE
            | WS_TABSTOP
            | WINDOW_STYLE(CBS_DROPDOWNLIST | CBS_SORT | CBS_OWNERDRAWFIXED),
        x,
        y,
        COMBO_WIDTH,
        160, // includes the dropdown area
        Some(hwnd),
        Some(HMENU(id as *mut _)),
        Some(hinstance),
        None,
    )
    .unwrap_or_default()
}

unsafe fn create_button(
    hwnd: HWND,
    hinstance: windows::Win32::Foundation::HINSTANCE,
    x: i32,
    y: i32,
    text: &str,
    id: i32,
) -> HWND {
    let text_wide = to_wide(text);
    CreateWindowExW(
        WINDOW_EX_STYLE::default(),
        w!("BUTTON"),
        PCWSTR(text_wide.as_ptr()),
        WS_CHILD | WS_VISIBLE | WS_TABSTOP,
        x,
        y,
        BUTTON_WIDTH,
        26,
        Some(hwnd),
        Some(HMENU(id as *mut _)),
        Some(hinstance),
        None,
    )
    .unwrap_or_default()
}

/// Add every live entry to an owner-drawn combo. The item data is the
/// entry's slot index in the backing list.
unsafe fn fill_combo(combo: HWND, slots: &[usize], selected: Option<usize>) {
    for &slot in slots {
        SendMessageW(combo, CB_ADDSTRING, None, Some(LPARAM(slot as isize)));
    }
    if let Some(selected_slot) = selected {
        if let Some(pos) = combo_position_of_slot(combo, selected_slot) {
            SendMessageW(combo, CB_SETCURSEL, Some(WPARAM(pos)), None);
        }
    }
}

/// Find the combo position holding a given slot index as item data. The
/// control keeps its own (sorted) order, so positions are looked up.
unsafe fn combo_position_of_slot(combo: HWND, slot: usize) -> Option<usize> {
    let count = SendMessageW(combo, CB_GETCOUNT, None, None).0;
    (0..count).find(|&pos| {
        SendMessageW(combo, CB_GETITEMDATA, Some(WPARAM(pos as usize)), None).0 == slot as isize
    })
    .map(|pos| pos as usize)
}

/// Slot index of the current combo selection, if any.
unsafe fn combo_selected_slot(combo: HWND) -> Option<usize> {
    let pos = SendMessageW(combo, CB_GETCURSEL, None, None).0;
    if pos == CB_ERR {
        return None;
    }
    let data = SendMessageW(combo, CB_GETITEMDATA, Some(WPARAM(pos as usize)), None).0;
    if data == CB_ERR {
        None
    } else {
        Some(data as usize)
    }
}

fn list_for_control(
    state: &DialogState,
    control_id: i32,
) -> Option<&crate::locale::LangList> {
    match control_id {
        ID_UILANG => Some(state.page.ui_langs()),
        ID_HELPLANG => Some(state.page.help_langs()),
        _ => None,
    }
}

unsafe fn draw_item(dis: &DRAWITEMSTRUCT) {
    if dis.itemID == u32::MAX {
        return;
    }
    DIALOG.with(|d| {
        let d = d.borrow();
        let Some(state) = d.as_ref() else { return };
        let Some(list) = list_for_control(state, dis.CtlID as i32) else {
            return;
        };
        let Some(entry) = list.get(dis.itemData as usize) else {
            return;
        };

        let selected = dis.itemState.0 & ODS_SELECTED != 0;
        let plan = paint_plan(entry, selected);
        let palette = &state.palette;
        let dc = dis.hDC;
        let rc: RECT = dis.rcItem;

        let brush = CreateSolidBrush(rgb_to_colorref(palette.color(plan.background)));
        FillRect(dc, &rc, brush);
        let _ = DeleteObject(brush.into());

        let orig_bk = SetBkMode(dc, TRANSPARENT);
        let mut orig_align = None;
        let mut orig_color = None;
        for run in plan.runs {
            let (align, x) = match run.align {
                Align::Left => (TA_LEFT, rc.left + ITEM_TEXT_INSET_X),
                Align::Right => (TA_RIGHT, rc.right - ITEM_TEXT_INSET_X),
            };
            let prev_align = SetTextAlign(dc, TEXT_ALIGN_OPTIONS(align));
            let prev_color = SetTextColor(dc, rgb_to_colorref(palette.color(run.color)));
            orig_align.get_or_insert(prev_align);
            orig_color.get_or_insert(prev_color);
            let text: Vec<u16> = run.text.encode_utf16().collect();
            let _ = TextOutW(dc, x, rc.top + ITEM_TEXT_INSET_Y, &text);
        }
        if let Some(align) = orig_align {
            SetTextAlign(dc, TEXT_ALIGN_OPTIONS(align));
        }
        if let Some(color) = orig_color {
            SetTextColor(dc, color);
        }
        SetBkMode(dc, BACKGROUND_MODE(orig_bk));
    });
}

/// Sort callback for the combos: case-insensitive description order,
/// itemless entries equal.
fn compare_items(cis: &COMPAREITEMSTRUCT) -> i32 {
    DIALOG.with(|d| {
        let d = d.borrow();
        let Some(state) = d.as_ref() else { return 0 };
        let Some(list) = list_for_control(state, cis.CtlID as i32) else {
            return 0;
        };
        let a = list.get(cis.itemData1 as usize);
        let b = list.get(cis.itemData2 as usize);
        match CandidateEntry::cmp_entries(a, b) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
    })
}

/// The control is dropping an item: free its slot in the backing list.
fn release_item(dis: &DELETEITEMSTRUCT) {
    DIALOG.with(|d| {
        if let Some(state) = d.borrow_mut().as_mut() {
            let slot = dis.itemData as usize;
            match dis.CtlID as i32 {
                ID_UILANG => state.page.release_entry(LangCombo::UiLanguage, slot),
                ID_HELPLANG => state.page.release_entry(LangCombo::HelpLanguage, slot),
                _ => {}
            }
        }
    });
}

unsafe fn handle_command(hwnd: HWND, control_id: i32, notification: u32) {
    match control_id {
        ID_UILANG | ID_HELPLANG if notification == CBN_SELCHANGE => {
            let combo = GetDlgItem(Some(hwnd), control_id).unwrap_or_default();
            let Some(slot) = combo_selected_slot(combo) else {
                return;
            };
            let which = if control_id == ID_UILANG {
                LangCombo::UiLanguage
            } else {
                LangCombo::HelpLanguage
            };
            let dirty = DIALOG.with(|d| {
                let mut d = d.borrow_mut();
                let Some(state) = d.as_mut() else {
                    return false;
                };
                state.page.selection_changed(which, slot);
                state.page.is_dirty()
            });
            // Property-sheet "changed" notification: light up Apply.
            if dirty {
                if let Ok(apply_btn) = GetDlgItem(Some(hwnd), ID_APPLY) {
                    let _ = EnableWindow(apply_btn, true);
                }
            }
        }
        ID_OK => {
            apply_changes();
            close_options_window();
        }
        ID_CANCEL => {
            close_options_window();
        }
        ID_APPLY => {
            apply_changes();
            if let Ok(apply_btn) = GetDlgItem(Some(hwnd), ID_APPLY) {
                let _ = EnableWindow(apply_btn, false);
            }
        }
        ID_HELP_BTN => {
            DIALOG.with(|d| {
                if let Some(state) = d.borrow_mut().as_mut() {
                    let DialogState { page, help, .. } = state;
                    page.help_requested(help);
                }
            });
        }
        _ => {}
    }
}

fn apply_changes() {
    DIALOG.with(|d| {
        if let Some(state) = d.borrow_mut().as_mut() {
            // Validation precedes apply; the page currently accepts everything.
            if !state.page.validate() {
                return;
            }
            let DialogState {
                page,
                options,
                ctx,
                help,
                ..
            } = state;
            page.apply(options, ctx, help);
            config::save_options(options);
        }
    });
}
