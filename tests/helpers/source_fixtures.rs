//! Common Kotlin sources for generator tests.

/// One module, one contribution function, binding in the same file.
pub const SINGLE_ACTIVITY_MODULE: &str = r#"package com.example.ui

import dagger.Module
import dagger.android.ContributesAndroidInjector

@Module
abstract class ActivityModule {
    @ContributesAndroidInjector
    abstract fun provideMain(): MainActivity
}

class MainActivity
"#;

/// Expected output for [`SINGLE_ACTIVITY_MODULE`].
pub const SINGLE_ACTIVITY_MODULE_OUTPUT: &str = r#"// Generated by dev.quiro.sheath.compiler.SheathComponentRegistrar
// https://github.com/quiro91/sheath

package com.example.ui

import dagger.Binds
import dagger.Module
import dagger.Subcomponent
import dagger.android.AndroidInjector
import dagger.android.ContributesAndroidInjector
import dagger.multibindings.ClassKey
import dagger.multibindings.IntoMap

@Module(subcomponents = [ActivityModule_BindMainActivity.MainActivitySubcomponent::class])
abstract class ActivityModule_BindMainActivity private constructor() {
  @Binds
  @IntoMap
  @ClassKey(MainActivity::class)
  abstract fun bindAndroidInjectorFactory(builder: ActivityModule_BindMainActivity.MainActivitySubcomponent.Factory): AndroidInjector.Factory<*>

  @Subcomponent
  interface MainActivitySubcomponent : AndroidInjector<MainActivity> {
    @Subcomponent.Factory
    interface Factory : AndroidInjector.Factory<MainActivity>
  }
}
"#;

/// Nested modules, a companion object and copied annotations.
pub const NESTED_MODULES: &str = r#"package com.example.di

import com.example.di.scopes.*
import dagger.Module
import dagger.android.ContributesAndroidInjector
import javax.inject.Named

@Module
abstract class AppModule {
    @ActivityScope
    @Named("main")
    @ContributesAndroidInjector(modules = [MainModule::class])
    abstract fun provideMain(): MainActivity

    @Module
    abstract class Fragments {
        @ContributesAndroidInjector
        abstract fun provideList(): ListFragment

        companion object {
            @ContributesAndroidInjector
            fun provideDetail(): DetailFragment = TODO()
        }
    }
}

class MainActivity
class ListFragment
class DetailFragment
"#;

pub const SCOPES: &str = r#"package com.example.di.scopes

annotation class ActivityScope
"#;

/// A module in another package binding the same simple names.
pub const SECOND_MODULE: &str = r#"package com.example.settings

import dagger.Module
import dagger.android.ContributesAndroidInjector

@Module
interface SettingsModule {
    @ContributesAndroidInjector
    fun provideSettings(): SettingsActivity

    @ContributesAndroidInjector
    fun provideMain(): MainActivity
}

class SettingsActivity
class MainActivity
"#;
