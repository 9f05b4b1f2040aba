//! Module lookup inside an opened process

use crate::core::types::{Address, ModuleInfo, RadarError, RadarResult};
use crate::process::ProcessHandle;
use crate::windows::utils::{wide_to_string, WinError};
use std::{mem, ptr};
use winapi::shared::minwindef::{DWORD, FALSE, HMODULE, MAX_PATH};
use winapi::um::psapi::{EnumProcessModules, GetModuleBaseNameW, GetModuleInformation, MODULEINFO};

const INITIAL_MODULE_CAPACITY: usize = 1024;

/// Enumerates modules loaded in a process
pub struct ModuleEnumerator<'a> {
    handle: &'a ProcessHandle,
}

impl<'a> ModuleEnumerator<'a> {
    pub fn new(handle: &'a ProcessHandle) -> Self {
        ModuleEnumerator { handle }
    }

    /// Enumerate all modules in the process
    pub fn enumerate(&self) -> RadarResult<Vec<ModuleInfo>> {
        let mut modules: Vec<HMODULE> = vec![ptr::null_mut(); INITIAL_MODULE_CAPACITY];

        // The module list can grow between calls; retry until it fits
        loop {
            let mut cb_needed: DWORD = 0;
            let result = unsafe {
                EnumProcessModules(
                    self.handle.raw(),
                    modules.as_mut_ptr(),
                    (modules.len() * mem::size_of::<HMODULE>()) as DWORD,
                    &mut cb_needed,
                )
            };
            if result == FALSE {
                return Err(WinError::new("EnumProcessModules").into());
            }

            let count = cb_needed as usize / mem::size_of::<HMODULE>();
            if count <= modules.len() {
                modules.truncate(count);
                break;
            }
            modules.resize(count, ptr::null_mut());
        }

        Ok(modules
            .iter()
            .filter_map(|&module| self.module_info(module).ok())
            .collect())
    }

    fn module_info(&self, module: HMODULE) -> RadarResult<ModuleInfo> {
        unsafe {
            let mut base_name: [u16; MAX_PATH] = [0; MAX_PATH];
            let name_len = GetModuleBaseNameW(
                self.handle.raw(),
                module,
                base_name.as_mut_ptr(),
                MAX_PATH as DWORD,
            );

            if name_len == 0 {
                return Err(WinError::new("GetModuleBaseNameW").into());
            }

            let mut mod_info: MODULEINFO = mem::zeroed();
            let result = GetModuleInformation(
                self.handle.raw(),
                module,
                &mut mod_info,
                mem::size_of::<MODULEINFO>() as DWORD,
            );

            if result == FALSE {
                return Err(WinError::new("GetModuleInformation").into());
            }

            Ok(ModuleInfo::new(
                wide_to_string(&base_name[..name_len as usize]),
                Address::new(mod_info.lpBaseOfDll as usize),
                mod_info.SizeOfImage as usize,
            ))
        }
    }

    /// Find a module by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> RadarResult<ModuleInfo> {
        self.enumerate()?
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| RadarError::ModuleNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_find_ntdll_in_current_process() {
        let handle = ProcessHandle::open_for_read(std::process::id())
            .expect("Failed to open current process");
        let module = ModuleEnumerator::new(&handle).find_by_name("NTDLL.DLL").unwrap();
        assert!(!module.base_address.is_null());
        assert!(module.size > 0);
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_enumerate_lists_every_module() {
        let handle = ProcessHandle::open_for_read(std::process::id())
            .expect("Failed to open current process");
        let modules = ModuleEnumerator::new(&handle).enumerate().unwrap();
        assert!(modules.iter().any(|m| m.name.eq_ignore_ascii_case("kernel32.dll")));
        assert!(modules.iter().all(|m| m.size > 0));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_missing_module() {
        let handle = ProcessHandle::open_for_read(std::process::id())
            .expect("Failed to open current process");
        let result = ModuleEnumerator::new(&handle).find_by_name("client.dll");
        assert!(matches!(result, Err(RadarError::ModuleNotFound(_))));
    }
}
